//! Gateway usecase error taxonomy.

use common::error::{Error, ErrorKind};

/// Failure kinds reported by the gateway usecase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GatewayErrorKind {
    /// The user service answered with an error status, kept as the cause
    #[error("upstream call failed")]
    UpstreamCallFailed,
    #[error("validation failed")]
    ValidationFailed,
    #[error("unknown gateway error")]
    Unknown,
}

impl ErrorKind for GatewayErrorKind {}

pub type GatewayError = Error<GatewayErrorKind>;

/// Result type alias for gateway usecase operations
pub type GatewayResult<T> = Result<T, GatewayError>;
