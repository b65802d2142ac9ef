//! Fallback for unmatched paths and methods.

use crate::error::{HandlerError, TransportError, TransportErrorKind};

pub async fn no_route() -> HandlerError {
    TransportError::new(TransportErrorKind::NoRoute).into()
}
