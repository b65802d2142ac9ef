//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use domain::{validate, ValidationMessages};

use crate::error::{HandlerError, TransportError, TransportErrorKind};

/// JSON extractor that automatically validates the payload.
///
/// An unreadable body is `BadParams`; a body that breaks field rules is
/// `ValidationFailed` carrying every field's message.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + ValidationMessages,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| TransportError::new(TransportErrorKind::BadParams).with_cause(e))?;

        validate(&value)
            .map_err(|e| TransportError::new(TransportErrorKind::ValidationFailed).with_cause(e))?;

        Ok(ValidatedJson(value))
    }
}
