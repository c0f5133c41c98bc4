//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input to a computation.
/// Absent search results are `None`, never an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid timestamp in field '{field}': {value}")]
    InvalidTimestamp { field: String, value: String },

    #[error("invalid color '{input}': {reason}")]
    InvalidColor { input: String, reason: String },
}

impl DomainError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
