//! Uniform response envelope `{code, message, data}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use domain::UserResponse;

use crate::clients::TokenResponse;

/// Envelope used for every JSON body, success or failure.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(UserEnvelope = StandardResponse<UserResponse>, TokenEnvelope = StandardResponse<TokenResponse>)]
pub struct StandardResponse<T> {
    /// HTTP status code, repeated in the body
    pub code: u16,
    pub message: String,
    /// Payload; `null` on failure
    pub data: Option<T>,
}

impl<T> StandardResponse<T> {
    pub fn new(status: StatusCode, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            message: status.canonical_reason().unwrap_or_default().to_string(),
            data,
        }
    }

    /// 200 with payload
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, Some(data))
    }

    /// 201 with payload
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, Some(data))
    }

    fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl StandardResponse<()> {
    /// Failure envelope with `data: null`.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for StandardResponse<T> {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
