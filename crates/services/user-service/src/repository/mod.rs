//! Repository layer for data access.

pub mod entities;
mod error;
mod user_repository;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryResult};
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserStore};
