//! Diff result types.

use crate::model::{Document, Field};

/// One allow-listed field that differs between an old and a new document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldChange<'a> {
    /// Present only in the new document
    Added(&'a Field),
    /// Present only in the old document
    Removed(&'a Field),
    /// Present in both with a different value or type
    Modified { old: &'a Field, new: &'a Field },
}

impl<'a> FieldChange<'a> {
    pub fn key(&self) -> &'a str {
        match self {
            FieldChange::Added(f) | FieldChange::Removed(f) => &f.key,
            FieldChange::Modified { new, .. } => &new.key,
        }
    }

    /// The field as it should read after the update, if it still exists
    pub fn new_field(&self) -> Option<&'a Field> {
        match self {
            FieldChange::Added(f) | FieldChange::Modified { new: f, .. } => Some(f),
            FieldChange::Removed(_) => None,
        }
    }
}

/// What the batch needs to do for one merged document pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocumentAction<'a> {
    /// Old and new agree on every allow-listed field
    Unchanged,
    /// Only an old document exists; there is nothing to add
    NoNewDocument { old: &'a Document },
    /// Rewrite the whole new document
    FullAdd { new: &'a Document },
    /// Send only the changed fields as partial updates
    InPlaceAdd {
        old: &'a Document,
        new: &'a Document,
    },
}

impl<'a> DocumentAction<'a> {
    pub fn document_id(&self) -> Option<&'a str> {
        match self {
            DocumentAction::Unchanged => None,
            DocumentAction::NoNewDocument { old } => Some(old.id()),
            DocumentAction::FullAdd { new } | DocumentAction::InPlaceAdd { new, .. } => {
                Some(new.id())
            }
        }
    }
}
