//! # Session Errors

use thiserror::Error;

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// Session and authentication errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Username or password did not match
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No session, no flag, or flag false
    #[error("Authentication required")]
    Unauthenticated,

    /// Session id could not be parsed
    #[error("Malformed session id")]
    MalformedSessionId,

    /// Backing store failed
    #[error("Session storage error: {0}")]
    StorageError(String),
}
