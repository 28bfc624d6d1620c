//! Wire encoding of documents.
//!
//! Produces the JSON fragments of an update body by hand so that field order
//! and number formatting are fully controlled:
//!
//! ```text
//! {"id":"<id>","<key>":<value>,...}            standard
//! {"id":"<id>","<key>":{"set":<value>},...}    in-place
//! ```
//!
//! Keys and string values are written verbatim; quotes and control
//! characters inside them are NOT escaped.

use std::fmt::Write as _;

use serde_json::Value;

use crate::config::FieldAllowList;
use crate::errors::{DocDeltaError, Result};
use crate::model::{value_type_name, Document, Field};

/// How each field value is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMode {
    /// `"key":value`
    Standard,
    /// `"key":{"set":value}`
    InPlace,
}

/// String buffer whose every append returns a `Result`, so the first
/// failure short-circuits the rest of the body.
#[derive(Debug, Default)]
pub struct JsonWriter {
    buf: String,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&mut self, s: &str) -> Result<()> {
        self.buf.write_str(s)?;
        Ok(())
    }

    pub fn quoted(&mut self, s: &str) -> Result<()> {
        write!(self.buf, "\"{}\"", s)?;
        Ok(())
    }

    /// `"key":`
    pub fn key(&mut self, key: &str) -> Result<()> {
        self.quoted(key)?;
        self.raw(":")
    }

    /// Render a scalar. Anything but an integer, float or string fails.
    pub fn scalar(&mut self, document_id: &str, key: &str, value: &Value) -> Result<()> {
        match value {
            Value::Number(n) => {
                write!(self.buf, "{}", n)?;
                Ok(())
            }
            Value::String(s) => self.quoted(s),
            other => Err(DocDeltaError::UnsupportedFieldType {
                document_id: document_id.to_string(),
                key: key.to_string(),
                type_name: value_type_name(other),
            }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

/// Write `{"id":"<id>",...}` for `fields`, dropping keys the allow-list rejects.
///
/// `fields` must already be in ascending key order.
pub fn write_fields<'a>(
    w: &mut JsonWriter,
    id: &str,
    fields: impl IntoIterator<Item = &'a Field>,
    allowed: &FieldAllowList,
    mode: EncodeMode,
) -> Result<()> {
    w.raw("{")?;
    w.key("id")?;
    w.quoted(id)?;

    for field in fields {
        if !allowed.allows(&field.key) {
            continue;
        }

        w.raw(",")?;
        w.key(&field.key)?;
        match mode {
            EncodeMode::Standard => w.scalar(id, &field.key, &field.value)?,
            EncodeMode::InPlace => {
                w.raw("{")?;
                w.key("set")?;
                w.scalar(id, &field.key, &field.value)?;
                w.raw("}")?;
            }
        }
    }

    w.raw("}")
}

/// Encode a whole document in the given mode
///
/// # Errors
///
/// `UnsupportedFieldType` if an allow-listed field holds a non-scalar value.
pub fn encode_document(doc: &Document, allowed: &FieldAllowList, mode: EncodeMode) -> Result<String> {
    let mut w = JsonWriter::new();
    write_fields(&mut w, doc.id(), doc.fields(), allowed, mode)?;
    Ok(w.finish())
}

/// Encode a document with literal values
///
/// # Errors
///
/// `UnsupportedFieldType` if an allow-listed field holds a non-scalar value.
pub fn json_encode(doc: &Document, allowed: &FieldAllowList) -> Result<String> {
    encode_document(doc, allowed, EncodeMode::Standard)
}

/// Encode a document with every field wrapped as `{"set":value}`
///
/// # Errors
///
/// `UnsupportedFieldType` if an allow-listed field holds a non-scalar value.
pub fn in_place_update_encode(doc: &Document, allowed: &FieldAllowList) -> Result<String> {
    encode_document(doc, allowed, EncodeMode::InPlace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_formats() {
        let mut w = JsonWriter::new();
        w.scalar("1", "i", &Value::from(-42)).unwrap();
        w.raw(" ").unwrap();
        w.scalar("1", "f", &Value::from(10.5)).unwrap();
        w.raw(" ").unwrap();
        w.scalar("1", "u", &Value::from(u64::MAX)).unwrap();
        w.raw(" ").unwrap();
        w.scalar("1", "s", &Value::from("x")).unwrap();
        assert_eq!(w.as_str(), r#"-42 10.5 18446744073709551615 "x""#);
    }

    #[test]
    fn test_strings_are_not_escaped() {
        let doc = Document::new("1").with_field("s", r#"say "hi""#);
        let got = json_encode(&doc, &FieldAllowList::all()).unwrap();
        assert_eq!(got, r#"{"id":"1","s":"say "hi""}"#);
    }

    #[test]
    fn test_unsupported_type_names_field() {
        let doc = Document::new("7").with_field("flag", true);
        let err = json_encode(&doc, &FieldAllowList::all()).unwrap_err();
        assert_eq!(
            err,
            DocDeltaError::UnsupportedFieldType {
                document_id: "7".to_string(),
                key: "flag".to_string(),
                type_name: "boolean",
            }
        );
    }

    #[test]
    fn test_filtered_out_unsupported_field_is_ignored() {
        let doc = Document::new("7").with_field("flag", true).with_field("n", 1);
        let got = json_encode(&doc, &FieldAllowList::only(["n"])).unwrap();
        assert_eq!(got, r#"{"id":"7","n":1}"#);
    }
}
