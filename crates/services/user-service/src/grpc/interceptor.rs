//! Request id enforcement and error translation for every RPC.

use std::future::Future;
use std::time::Instant;

use tonic::{Request, Status};

use common::{report, RequestContext, RequestId, REQUEST_ID_METADATA_KEY};

use crate::service::{UsecaseError, UsecaseErrorKind, UsecaseResult};

pub const MISSING_REQUEST_ID: &str = "No request ID provided";

/// Interceptor: reject calls without `request-id` metadata and store the
/// request context for the handler.
pub fn require_request_id(mut request: Request<()>) -> Result<Request<()>, Status> {
    let request_id = request
        .metadata()
        .get(REQUEST_ID_METADATA_KEY)
        .and_then(|value| value.to_str().ok())
        .and_then(RequestId::parse);

    match request_id {
        Some(id) => {
            request.extensions_mut().insert(RequestContext::new(id));
            Ok(request)
        }
        None => {
            tracing::error!("Call rejected: {}", MISSING_REQUEST_ID);
            Err(Status::internal(MISSING_REQUEST_ID))
        }
    }
}

/// Context stored by [`require_request_id`].
pub fn context<T>(request: &Request<T>) -> Result<RequestContext, Status> {
    request
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .ok_or_else(|| Status::internal(MISSING_REQUEST_ID))
}

/// gRPC status for a usecase failure. Internal causes never reach the caller.
pub fn to_status(err: &UsecaseError) -> Status {
    match err.kind() {
        UsecaseErrorKind::ValidationFailed => Status::invalid_argument(
            err.cause_message()
                .unwrap_or_else(|| UsecaseErrorKind::ValidationFailed.to_string()),
        ),
        UsecaseErrorKind::UserAlreadyExists => {
            Status::already_exists("Email already been registered")
        }
        UsecaseErrorKind::UserNotFound => Status::not_found("User not found"),
        UsecaseErrorKind::InvalidCredentials => Status::unauthenticated("Wrong email or password"),
        UsecaseErrorKind::PasswordHashingFailed | UsecaseErrorKind::TokenSigningFailed => {
            Status::internal("Internal error")
        }
        UsecaseErrorKind::Unknown => Status::unknown("Unknown"),
    }
}

/// Run one RPC body: translate its error and log method, request id and
/// latency.
pub async fn observe<T, F>(method: &'static str, ctx: &RequestContext, call: F) -> Result<T, Status>
where
    F: Future<Output = UsecaseResult<T>>,
{
    let started = Instant::now();
    let result = call.await;
    let latency = started.elapsed();

    match result {
        Ok(value) => {
            tracing::info!(method, request_id = %ctx.request_id(), ?latency, "RPC completed");
            Ok(value)
        }
        Err(err) => {
            let status = to_status(&err);
            match status.code() {
                tonic::Code::Internal | tonic::Code::Unknown => tracing::error!(
                    method,
                    request_id = %ctx.request_id(),
                    ?latency,
                    code = ?status.code(),
                    error = %report(&err),
                    "RPC failed"
                ),
                _ => tracing::warn!(
                    method,
                    request_id = %ctx.request_id(),
                    ?latency,
                    code = ?status.code(),
                    error = %err,
                    "RPC failed"
                ),
            }
            Err(status)
        }
    }
}
