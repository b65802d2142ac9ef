//! Service layer - business logic.

mod error;
mod token;
mod user_service;

pub use error::{UsecaseError, UsecaseErrorKind, UsecaseResult};
pub use token::{Claims, TokenError, TokenIssuer};
#[cfg(test)]
pub use user_service::MockUserService;
pub use user_service::{UserManager, UserService};
