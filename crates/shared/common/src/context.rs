//! Request correlation.
//!
//! A request id is created once at the HTTP edge, carried to the user service
//! in call metadata and handed down explicitly to every layer that logs.

use std::fmt;

use uuid::Uuid;

/// gRPC metadata key carrying the request id.
pub const REQUEST_ID_METADATA_KEY: &str = "request-id";

/// HTTP response header echoing the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Opaque per-request correlation identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept an id received from a caller. Blank values are rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request-scoped values passed down through usecases and repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: RequestId,
}

impl RequestContext {
    pub fn new(request_id: RequestId) -> Self {
        Self { request_id }
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }
}
