//! Collection error types

use thiserror::Error;

/// Result type for single-record collection operations
pub type CollectionResult<T> = Result<T, CollectionError>;

/// Per-record failures. Batch operations report these as data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// Another record already holds this unique value
    #[error("duplicate record: {0}")]
    Duplicate(String),

    /// No record holds this unique value
    #[error("record not found: {0}")]
    NotFound(String),
}
