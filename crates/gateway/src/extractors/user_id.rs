//! `:user_id` path parameter.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::{HandlerError, TransportError, TransportErrorKind};

/// Numeric user id from the path; anything else is `BadParams`.
pub struct UserIdPath(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(user_id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|e| TransportError::new(TransportErrorKind::BadParams).with_cause(e))?;
        Ok(UserIdPath(user_id))
    }
}
