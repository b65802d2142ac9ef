//! Request context set by the request id middleware.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use common::RequestContext;

use crate::error::{HandlerError, TransportError, TransportErrorKind};

/// The current request's context.
pub struct Ctx(pub RequestContext);

#[async_trait]
impl<S> FromRequestParts<S> for Ctx
where
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Ctx)
            .ok_or_else(|| {
                TransportError::new(TransportErrorKind::Unknown)
                    .with_cause("request context missing")
                    .into()
            })
    }
}
