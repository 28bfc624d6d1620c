use serde_json::Value;

use crate::ordered::Keyed;

/// A flat key/value pair of a document.
///
/// The value is held as a JSON scalar. Only integers, floats and strings can
/// be encoded into an update body; other kinds are carried through and
/// rejected at encode time.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: Value,
}

impl Field {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Same-type-and-same-value comparison: `10`, `10.0` and `"10"` are all
    /// distinct values.
    pub fn same_value(&self, other: &Field) -> bool {
        self.value == other.value
    }
}

impl Keyed for Field {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Human-readable name of a value's kind, used in error messages.
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
