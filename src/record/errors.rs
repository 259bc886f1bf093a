//! Record error types

use thiserror::Error;

/// Result type for record construction
pub type RecordResult<T> = Result<T, RecordError>;

/// Reasons a record is rejected at construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Input was not a JSON object
    #[error("record must be an object, got {0}")]
    NotAnObject(&'static str),

    /// A required field is absent
    #[error("missing required field: {0}")]
    MissingField(String),

    /// The unique field holds something other than a string
    #[error("unique field '{0}' must be a string")]
    UniqueNotString(String),

    /// Field holds null, an array, or an object
    #[error("field '{field}' has unsupported {kind} value")]
    UnsupportedValue { field: String, kind: &'static str },
}
