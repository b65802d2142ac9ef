//! Middleware chain: request logging, error handling, CORS, request id.

mod cors;
mod error_handler;
mod logger;
mod request_id;

pub use cors::cors;
pub use error_handler::{handle_errors, resolve, Resolution, BAD_PARAMS, NOTHING_HERE};
pub use logger::log_request;
pub use request_id::request_id;
