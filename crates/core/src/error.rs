//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every directory operation fails into exactly one of these; the HTTP layer
/// maps them one-to-one onto status codes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing or empty at the boundary.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record with the same title already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The referenced title does not exist.
    #[error("not found")]
    NotFound,

    /// Any other failure from the backing store (network, throttling, auth).
    #[error("store error: {0}")]
    Store(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
