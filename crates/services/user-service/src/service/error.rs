//! Usecase error taxonomy.

use common::error::{Error, ErrorKind};

/// Failure kinds reported by the user usecase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsecaseErrorKind {
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("password hashing failed")]
    PasswordHashingFailed,
    /// Input broke one or more field rules; the cause holds the messages
    #[error("validation failed")]
    ValidationFailed,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token signing failed")]
    TokenSigningFailed,
    #[error("unknown usecase error")]
    Unknown,
}

impl ErrorKind for UsecaseErrorKind {}

pub type UsecaseError = Error<UsecaseErrorKind>;

/// Result type alias for usecase operations
pub type UsecaseResult<T> = Result<T, UsecaseError>;
