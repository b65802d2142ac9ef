//! HTTP request handlers.

pub mod no_route;
pub mod user_handler;

pub use no_route::no_route;
pub use user_handler::user_routes;
