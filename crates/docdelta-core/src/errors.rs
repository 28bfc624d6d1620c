use thiserror::Error;

/// Result type alias using DocDeltaError
pub type Result<T> = std::result::Result<T, DocDeltaError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and tests can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,

    // Encoding
    UnsupportedFieldType,
    Encoding,

    // Integration/IO
    Transport,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::UnsupportedFieldType => "ERR_UNSUPPORTED_FIELD_TYPE",
            ExErrorKind::Encoding => "ERR_ENCODING",
            ExErrorKind::Transport => "ERR_TRANSPORT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus the document and field context needed to
/// find the offending input row.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    document_id: Option<String>,
    field_key: Option<String>,
    line: Option<u64>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            document_id: None,
            field_key: None,
            line: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add document ID context
    pub fn with_document_id(mut self, id: impl Into<String>) -> Self {
        self.document_id = Some(id.into());
        self
    }

    /// Add field key context
    pub fn with_field_key(mut self, key: impl Into<String>) -> Self {
        self.field_key = Some(key.into());
        self
    }

    /// Add input line context
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = Some(line);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn document_id(&self) -> Option<&str> {
        self.document_id.as_deref()
    }

    pub fn field_key(&self) -> Option<&str> {
        self.field_key.as_deref()
    }

    pub fn line(&self) -> Option<u64> {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(document_id) = &self.document_id {
            write!(f, " (document_id: {})", document_id)?;
        }
        if let Some(field_key) = &self.field_key {
            write!(f, " (field_key: {})", field_key)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line: {})", line)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for building update batches
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocDeltaError {
    // ===== Input Errors =====
    /// Tabular input has no column usable as the document id
    #[error("Input has no id column (header: {header:?})")]
    MissingIdColumn { header: Vec<String> },

    /// A row could not be turned into a document
    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// Input could not be read or is otherwise unusable
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    // ===== Encoding Errors =====
    /// A field value is not an integer, float or string
    #[error("Unsupported field type {type_name} for field '{key}' of document {document_id}")]
    UnsupportedFieldType {
        document_id: String,
        key: String,
        type_name: &'static str,
    },

    /// Writing to the output buffer failed
    #[error("Encoding failed: {message}")]
    Encoding { message: String },

    // ===== IO Errors =====
    #[error("IO error during {operation}: {message}")]
    Io { operation: String, message: String },
}

impl From<DocDeltaError> for ExError {
    fn from(err: DocDeltaError) -> Self {
        match err {
            DocDeltaError::MissingIdColumn { header } => ExError::new(ExErrorKind::InvalidInput)
                .with_op("parse_csv")
                .with_message(format!(
                    "Input should contain an id column, got header {:?}",
                    header
                )),

            DocDeltaError::MalformedRow { line, reason } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("parse_csv")
                    .with_line(line)
                    .with_message(reason)
            }

            DocDeltaError::InvalidInput { reason } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(reason)
            }

            DocDeltaError::UnsupportedFieldType {
                document_id,
                key,
                type_name,
            } => ExError::new(ExErrorKind::UnsupportedFieldType)
                .with_op("encode")
                .with_document_id(document_id)
                .with_field_key(key)
                .with_message(format!("unsupported field type: {}", type_name)),

            DocDeltaError::Encoding { message } => ExError::new(ExErrorKind::Encoding)
                .with_op("encode")
                .with_message(message),

            DocDeltaError::Io { operation, message } => ExError::new(ExErrorKind::Io)
                .with_op(operation)
                .with_message(message),
        }
    }
}

impl From<std::fmt::Error> for DocDeltaError {
    fn from(err: std::fmt::Error) -> Self {
        DocDeltaError::Encoding {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::UnsupportedFieldType,
            ExErrorKind::Encoding,
            ExErrorKind::Transport,
            ExErrorKind::Io,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::UnsupportedFieldType)
            .with_op("encode")
            .with_document_id("7")
            .with_field_key("flag")
            .with_message("unsupported field type: bool");
        let shown = err.to_string();
        assert!(shown.starts_with("[ERR_UNSUPPORTED_FIELD_TYPE] in operation 'encode'"));
        assert!(shown.contains("(document_id: 7)"));
        assert!(shown.contains("(field_key: flag)"));
    }
}
