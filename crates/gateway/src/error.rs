//! HTTP layer errors.
//!
//! Handlers, extractors and middleware never build error responses
//! themselves. They return a [`HandlerError`], which leaves the failure on
//! the response for the error handling middleware to translate.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use common::error::{Error, ErrorKind};

/// Failure kinds raised by the HTTP layer itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransportErrorKind {
    /// An OPTIONS request; answered without touching any route
    #[error("CORS preflight")]
    CorsPreflight,
    #[error("No route")]
    NoRoute,
    /// Path or body could not be parsed
    #[error("Bad params")]
    BadParams,
    /// Body parsed but broke field rules; the cause holds the messages
    #[error("validation failed")]
    ValidationFailed,
    #[error("unknown transport error")]
    Unknown,
}

impl ErrorKind for TransportErrorKind {}

pub type TransportError = Error<TransportErrorKind>;

/// Failure collected from a handler, carried on the response extensions.
#[derive(Clone)]
pub struct CollectedError(pub Arc<dyn StdError + Send + Sync + 'static>);

impl CollectedError {
    pub fn get_ref(&self) -> &(dyn StdError + 'static) {
        &*self.0
    }
}

impl fmt::Debug for CollectedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

/// Error returned by handlers and extractors. Any error type converts into it.
pub struct HandlerError(Arc<dyn StdError + Send + Sync + 'static>);

impl HandlerError {
    pub fn get_ref(&self) -> &(dyn StdError + 'static) {
        &*self.0
    }
}

impl<E> From<E> for HandlerError
where
    E: StdError + Send + Sync + 'static,
{
    fn from(err: E) -> Self {
        Self(Arc::new(err))
    }
}

impl fmt::Debug for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerError").field(&self.0).finish()
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        // Placeholder; the error handler replaces status and body.
        let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
        response.extensions_mut().insert(CollectedError(self.0));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::find_kind;

    #[test]
    fn test_handler_error_keeps_failure_on_response() {
        let err = HandlerError::from(TransportError::new(TransportErrorKind::BadParams));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let collected = response.extensions().get::<CollectedError>().unwrap();
        assert_eq!(
            find_kind::<TransportErrorKind>(collected.get_ref()),
            Some(TransportErrorKind::BadParams)
        );
    }
}
