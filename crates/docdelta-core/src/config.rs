//! Batch configuration.
//!
//! A [`BatchConfig`] is fixed for the lifetime of a
//! [`BatchBuilder`](crate::builder::BatchBuilder): it decides which fields
//! take part in diffing and encoding, and which changed fields may be sent
//! as partial updates.

use std::collections::BTreeSet;

/// Set of field keys eligible for diffing and encoding.
///
/// An unrestricted list admits every field; a restricted one admits only
/// its members, and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAllowList {
    keys: Option<BTreeSet<String>>,
}

impl FieldAllowList {
    /// Admit every field
    pub fn all() -> Self {
        Self { keys: None }
    }

    /// Admit only the given keys
    pub fn only<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: Some(keys.into_iter().map(Into::into).collect()),
        }
    }

    pub fn allows(&self, key: &str) -> bool {
        self.keys.as_ref().map_or(true, |keys| keys.contains(key))
    }

    pub fn is_restricted(&self) -> bool {
        self.keys.is_some()
    }

    /// The admitted keys, or `None` when unrestricted
    pub fn keys(&self) -> Option<&BTreeSet<String>> {
        self.keys.as_ref()
    }
}

/// Immutable configuration of a batch builder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchConfig {
    allowed_fields: FieldAllowList,
    in_place_fields: BTreeSet<String>,
}

impl BatchConfig {
    /// All fields allowed, none updatable in place
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allowed_fields(mut self, allowed_fields: FieldAllowList) -> Self {
        self.allowed_fields = allowed_fields;
        self
    }

    pub fn with_in_place_fields<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.in_place_fields = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn allowed_fields(&self) -> &FieldAllowList {
        &self.allowed_fields
    }

    pub fn in_place_fields(&self) -> &BTreeSet<String> {
        &self.in_place_fields
    }

    /// Whether a changed `key` may be expressed as a partial update
    pub fn is_in_place(&self, key: &str) -> bool {
        self.in_place_fields.contains(key)
    }
}
