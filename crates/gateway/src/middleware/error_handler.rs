//! Centralized error translation.
//!
//! Runs the rest of the chain first, then turns a collected failure into a
//! status code and envelope. Headers set further in survive the rewrite.

use std::error::Error as StdError;

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use tonic::Status;

use common::{
    find_cause, report,
    status::{http_status, is_client_facing},
    RequestId,
};

use crate::clients::{GatewayError, GatewayErrorKind};
use crate::error::{CollectedError, TransportError, TransportErrorKind};
use crate::response::StandardResponse;

pub const NOTHING_HERE: &str = "Oops... nothing here";
pub const BAD_PARAMS: &str = "Bad params";

/// Outcome of translating a collected failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Empty 204
    Preflight,
    Envelope(StatusCode, String),
}

fn internal() -> Resolution {
    let status = StatusCode::INTERNAL_SERVER_ERROR;
    Resolution::Envelope(status, status.canonical_reason().unwrap_or_default().to_string())
}

fn validation(message: Option<String>) -> Resolution {
    Resolution::Envelope(
        StatusCode::BAD_REQUEST,
        message.unwrap_or_else(|| "validation failed".to_string()),
    )
}

/// Translate a failure: transport kind, then gateway kind, then the upstream
/// RPC status, else 500.
pub fn resolve(err: &(dyn StdError + 'static)) -> Resolution {
    if let Some(transport) = find_cause::<TransportError>(err) {
        return match transport.kind() {
            TransportErrorKind::CorsPreflight => Resolution::Preflight,
            TransportErrorKind::BadParams => {
                Resolution::Envelope(StatusCode::BAD_REQUEST, BAD_PARAMS.to_string())
            }
            TransportErrorKind::ValidationFailed => validation(transport.cause_message()),
            TransportErrorKind::NoRoute => {
                Resolution::Envelope(StatusCode::NOT_FOUND, NOTHING_HERE.to_string())
            }
            TransportErrorKind::Unknown => internal(),
        };
    }

    if let Some(gateway) = find_cause::<GatewayError>(err) {
        match gateway.kind() {
            GatewayErrorKind::ValidationFailed => return validation(gateway.cause_message()),
            GatewayErrorKind::Unknown => return internal(),
            GatewayErrorKind::UpstreamCallFailed => {}
        }
    }

    if let Some(status) = find_cause::<Status>(err) {
        if is_client_facing(status.code()) {
            return Resolution::Envelope(http_status(status.code()), status.message().to_string());
        }
    }

    internal()
}

/// Middleware: rewrite responses that carry a [`CollectedError`].
pub async fn handle_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(collected) = response.extensions().get::<CollectedError>().cloned() else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.extensions.remove::<CollectedError>();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);

    let request_id = parts
        .extensions
        .get::<RequestId>()
        .map(ToString::to_string)
        .unwrap_or_default();

    match resolve(collected.get_ref()) {
        Resolution::Preflight => {
            parts.status = StatusCode::NO_CONTENT;
            Response::from_parts(parts, Body::empty())
        }
        Resolution::Envelope(status, message) => {
            if status.is_server_error() {
                tracing::error!(
                    request_id,
                    scope = "middleware#handleErrors",
                    error = %report(collected.get_ref()),
                    "Request failed"
                );
            }

            let body = match serde_json::to_vec(&StandardResponse::error(status, message)) {
                Ok(bytes) => Body::from(bytes),
                Err(e) => {
                    tracing::error!(request_id, error = %e, "Envelope serialization failed");
                    parts.status = StatusCode::INTERNAL_SERVER_ERROR;
                    return Response::from_parts(parts, Body::empty());
                }
            };

            parts.status = status;
            parts.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            Response::from_parts(parts, body)
        }
    }
}
