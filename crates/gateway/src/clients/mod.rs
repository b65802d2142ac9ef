//! Gateway usecase: calls to the user service.

mod error;
mod user_client;

pub use error::{GatewayError, GatewayErrorKind, GatewayResult};
#[cfg(test)]
pub use user_client::MockUserServiceUsecase;
pub use user_client::{TokenResponse, UserClient, UserServiceUsecase};
