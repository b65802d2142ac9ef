//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, gRPC, database).

use thiserror::Error;

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input failed one or more field rules; holds the joined field messages
    #[error("{0}")]
    Validation(String),

    /// The password hashing primitive failed
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create a password hashing error
    pub fn password_hash(msg: impl Into<String>) -> Self {
        DomainError::PasswordHash(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
