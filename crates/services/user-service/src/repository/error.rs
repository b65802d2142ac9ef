//! Repository error taxonomy.

use common::error::{Error, ErrorKind};

/// Failure kinds reported by the persistence layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryErrorKind {
    /// The store rejected a duplicate value on a unique column
    #[error("unique constraint violation")]
    UniqueViolation,
    /// No live row matched
    #[error("record not found")]
    NotFound,
    #[error("unknown repository error")]
    Unknown,
}

impl ErrorKind for RepositoryErrorKind {}

pub type RepositoryError = Error<RepositoryErrorKind>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
