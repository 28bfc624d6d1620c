//! Update batch builder.
//!
//! Collects old, new and deleted documents, then renders the smallest
//! update body that moves the index from the old snapshot to the new one:
//!
//! ```text
//! {"add":{"doc":{...}},"add":{"doc":{...}},"delete":["id",...]}
//! ```
//!
//! Adds are emitted in ascending id order, followed by at most one delete
//! member. An empty batch renders as `{}`.

use std::time::Instant;

use tracing::debug;

use crate::config::BatchConfig;
use crate::diff::{changed_fields, classify, DocumentAction};
use crate::encode::{write_fields, EncodeMode, JsonWriter};
use crate::errors::Result;
use crate::model::Document;
use crate::ordered::{merge_ordered, OrderedSet};
use crate::{log_op_end, log_op_error, log_op_start};

/// Counters describing one rendered batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Adds carrying the whole (allow-listed) document
    pub full_adds: usize,
    /// Adds carrying only `{"set":...}` field updates
    pub in_place_adds: usize,
    /// Pairs with no allow-listed difference
    pub skipped: usize,
    /// Ids in the delete member
    pub deletes: usize,
    /// Adds dropped because the same id is deleted in this batch
    pub suppressed_adds: usize,
}

impl BatchSummary {
    pub fn adds(&self) -> usize {
        self.full_adds + self.in_place_adds
    }

    pub fn is_empty(&self) -> bool {
        self.adds() == 0 && self.deletes == 0
    }
}

/// Accumulates one batch of document changes.
///
/// Not safe for concurrent mutation. Call [`flush`](Self::flush) between
/// logically distinct batches when reusing an instance.
#[derive(Debug, Clone, Default)]
pub struct BatchBuilder {
    config: BatchConfig,
    old_documents: OrderedSet<Document>,
    documents: OrderedSet<Document>,
    delete_documents: OrderedSet<Document>,
}

impl BatchBuilder {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            old_documents: OrderedSet::new(),
            documents: OrderedSet::new(),
            delete_documents: OrderedSet::new(),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Add a target document. A later add with the same id replaces it.
    pub fn add(&mut self, doc: Document) {
        self.documents.add(doc);
    }

    pub fn add_all(&mut self, docs: impl IntoIterator<Item = Document>) {
        self.documents.extend(docs);
    }

    /// Record the currently indexed version of a document
    pub fn add_old(&mut self, doc: Document) {
        self.old_documents.add(doc);
    }

    pub fn add_old_all(&mut self, docs: impl IntoIterator<Item = Document>) {
        self.old_documents.extend(docs);
    }

    /// Add `new` together with the `old` version it replaces
    pub fn update(&mut self, new: Document, old: Document) {
        self.documents.add(new);
        self.old_documents.add(old);
    }

    /// Delete a document by id. Delete wins over an add of the same id.
    pub fn delete(&mut self, id: impl Into<String>) {
        self.delete_documents.add(Document::new(id));
    }

    pub fn delete_all<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.delete(id);
        }
    }

    pub fn old_documents(&self) -> &OrderedSet<Document> {
        &self.old_documents
    }

    pub fn documents(&self) -> &OrderedSet<Document> {
        &self.documents
    }

    pub fn delete_documents(&self) -> &OrderedSet<Document> {
        &self.delete_documents
    }

    /// Render the update body
    ///
    /// # Errors
    ///
    /// `UnsupportedFieldType` if any emitted field holds a non-scalar value;
    /// no partial body is returned.
    pub fn build(&self) -> Result<String> {
        self.build_with_summary().map(|(body, _)| body)
    }

    /// Render the update body together with its counters
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build).
    pub fn build_with_summary(&self) -> Result<(String, BatchSummary)> {
        let started = Instant::now();
        log_op_start!(
            "build",
            document_count = self.documents.len(),
            old_document_count = self.old_documents.len(),
            delete_count = self.delete_documents.len(),
        );

        match self.render() {
            Ok((body, summary)) => {
                log_op_end!(
                    "build",
                    duration_ms = started.elapsed().as_millis() as u64,
                    full_adds = summary.full_adds,
                    in_place_adds = summary.in_place_adds,
                    skipped = summary.skipped,
                    deletes = summary.deletes,
                    suppressed_adds = summary.suppressed_adds,
                );
                Ok((body, summary))
            }
            Err(err) => {
                log_op_error!(
                    "build",
                    err.clone(),
                    duration_ms = started.elapsed().as_millis() as u64
                );
                Err(err)
            }
        }
    }

    fn render(&self) -> Result<(String, BatchSummary)> {
        let mut summary = BatchSummary::default();
        let mut w = JsonWriter::new();
        let mut first = true;

        w.raw("{")?;

        for merged in merge_ordered(&self.old_documents, &self.documents) {
            let (old, new) = merged.into_parts();
            let action = classify(old, new, &self.config);

            let (doc, mode) = match action {
                DocumentAction::Unchanged => {
                    summary.skipped += 1;
                    continue;
                }
                DocumentAction::NoNewDocument { old } => {
                    debug!(document_id = old.id(), "no target document, nothing to add");
                    continue;
                }
                DocumentAction::FullAdd { new } => (new, EncodeMode::Standard),
                DocumentAction::InPlaceAdd { new, .. } => (new, EncodeMode::InPlace),
            };

            if self.delete_documents.contains_key(doc.id()) {
                debug!(document_id = doc.id(), "add suppressed by delete of the same id");
                summary.suppressed_adds += 1;
                continue;
            }

            if !first {
                w.raw(",")?;
            }
            first = false;

            w.key("add")?;
            w.raw("{")?;
            w.key("doc")?;
            match action {
                DocumentAction::InPlaceAdd { old, new } => {
                    let allowed = self.config.allowed_fields();
                    write_fields(
                        &mut w,
                        new.id(),
                        changed_fields(old, new, allowed),
                        allowed,
                        mode,
                    )?;
                    summary.in_place_adds += 1;
                }
                _ => {
                    write_fields(
                        &mut w,
                        doc.id(),
                        doc.fields(),
                        self.config.allowed_fields(),
                        mode,
                    )?;
                    summary.full_adds += 1;
                }
            }
            w.raw("}")?;
        }

        if !self.delete_documents.is_empty() {
            if !first {
                w.raw(",")?;
            }
            w.key("delete")?;
            w.raw("[")?;
            for (i, id) in self.delete_documents.keys().enumerate() {
                if i != 0 {
                    w.raw(",")?;
                }
                w.quoted(id)?;
            }
            w.raw("]")?;
            summary.deletes = self.delete_documents.len();
        }

        w.raw("}")?;
        Ok((w.finish(), summary))
    }

    /// Clear all documents, keeping the configuration
    pub fn flush(&mut self) {
        self.old_documents.clear();
        self.documents.clear();
        self.delete_documents.clear();
    }
}
