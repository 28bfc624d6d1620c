//! CSV → documents
//!
//! The header row names the columns. The column whose header is `id` (any
//! case; the last one if several match) supplies the document id, every
//! other column becomes a field keyed by its header.

use std::io::Read;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use docdelta_core::errors::{DocDeltaError, Result};
use docdelta_core::{log_op_end, log_op_error, log_op_start, Document, Field};
use serde_json::Value;

use crate::options::ParseOptions;

/// Header that marks the id column, compared case-insensitively
pub const ID_COLUMN: &str = "id";

/// Parse CSV from `reader` into documents, in input order.
///
/// Nothing is returned unless every row parses.
///
/// # Errors
///
/// - `InvalidInput` if the header row cannot be read
/// - `MissingIdColumn` if no header is `id`
/// - `MalformedRow` for a ragged or unreadable row, or an empty id
pub fn parse_csv<R: Read>(reader: R, options: &ParseOptions) -> Result<Vec<Document>> {
    let started = Instant::now();
    log_op_start!("parse_csv", infer_types = options.infer_types());

    match read_documents(reader, options) {
        Ok(docs) => {
            log_op_end!(
                "parse_csv",
                duration_ms = started.elapsed().as_millis() as u64,
                document_count = docs.len(),
            );
            Ok(docs)
        }
        Err(err) => {
            log_op_error!(
                "parse_csv",
                err.clone(),
                duration_ms = started.elapsed().as_millis() as u64
            );
            Err(err)
        }
    }
}

/// Parse CSV held in a string
///
/// # Errors
///
/// Same as [`parse_csv`].
pub fn parse_csv_str(content: &str, options: &ParseOptions) -> Result<Vec<Document>> {
    parse_csv(content.as_bytes(), options)
}

fn read_documents<R: Read>(reader: R, options: &ParseOptions) -> Result<Vec<Document>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let header = reader
        .headers()
        .map_err(|e| DocDeltaError::InvalidInput {
            reason: format!("cannot read header: {}", e),
        })?
        .clone();
    let id_index = id_column(&header)?;

    let mut docs = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DocDeltaError::MalformedRow {
            line: e.position().map(|p| p.line()).unwrap_or_default(),
            reason: e.to_string(),
        })?;
        docs.push(to_document(&header, &record, id_index, options)?);
    }

    Ok(docs)
}

fn id_column(header: &StringRecord) -> Result<usize> {
    header
        .iter()
        .enumerate()
        .filter(|(_, column)| column.eq_ignore_ascii_case(ID_COLUMN))
        .map(|(i, _)| i)
        .last()
        .ok_or_else(|| DocDeltaError::MissingIdColumn {
            header: header.iter().map(String::from).collect(),
        })
}

fn to_document(
    header: &StringRecord,
    record: &StringRecord,
    id_index: usize,
    options: &ParseOptions,
) -> Result<Document> {
    let line = record.position().map(|p| p.line()).unwrap_or_default();
    let id = record.get(id_index).unwrap_or_default();
    if id.is_empty() {
        return Err(DocDeltaError::MalformedRow {
            line,
            reason: "empty id".to_string(),
        });
    }

    let fields = header
        .iter()
        .zip(record.iter())
        .enumerate()
        .filter(|(i, _)| *i != id_index)
        .map(|(_, (key, cell))| Field::new(key, cell_value(cell, options)));

    Ok(Document::from_fields(id, fields))
}

fn cell_value(cell: &str, options: &ParseOptions) -> Value {
    if options.infer_types() {
        if let Ok(n) = cell.parse::<i64>() {
            return Value::from(n);
        }
        if let Ok(f) = cell.parse::<f64>() {
            if f.is_finite() {
                return Value::from(f);
            }
        }
    }
    Value::from(cell)
}
