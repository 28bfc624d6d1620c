use serde_json::Value;

use crate::model::Field;
use crate::ordered::{Keyed, OrderedSet};

/// A document: an id plus a set of fields ordered by key.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: String,
    fields: OrderedSet<Field>,
}

impl Document {
    /// Create a document with no fields
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: OrderedSet::new(),
        }
    }

    /// Create a document from fields in any order; a repeated key keeps the last value.
    pub fn from_fields(id: impl Into<String>, fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            id: id.into(),
            fields: fields.into_iter().collect(),
        }
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.add(Field::new(key, value));
        self
    }

    /// Insert or replace a field, returning the previous one under that key
    pub fn set_field(&mut self, field: Field) -> Option<Field> {
        self.fields.add(field)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &OrderedSet<Field> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).map(|f| &f.value)
    }
}

impl Keyed for Document {
    fn key(&self) -> &str {
        &self.id
    }
}
