//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! The gateway and the user service both validate input against the rules
//! declared here, so the two sides always report the same messages.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{format_timestamp, LoginUser, NewUser, RegisterUser, User, UserResponse};
pub use validation::{not_empty, validate, Rule, ValidationMessages};
