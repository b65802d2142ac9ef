//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::UserServiceUsecase;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserServiceUsecase>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserServiceUsecase>) -> Self {
        Self { users }
    }
}
