//! Common utilities shared across all microservices.
//!
//! This crate provides:
//! - The layered error taxonomy used by every service
//! - Request correlation ids and context
//! - gRPC to HTTP status translation
//! - Configuration structures and tracing set-up

pub mod config;
pub mod context;
pub mod error;
pub mod status;
pub mod telemetry;

pub use config::*;
pub use context::{RequestContext, RequestId, REQUEST_ID_HEADER, REQUEST_ID_METADATA_KEY};
pub use error::{find_cause, find_kind, has_kind, report, BoxError, ErrorKind};
