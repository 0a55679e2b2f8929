//! Application state for dependency injection.

use std::sync::Arc;

use crate::infra::{Cache, Database};
use crate::repository::UserRepository;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// User persistence
    pub users: Arc<dyn UserRepository>,
    /// User cache, constructed once at startup
    pub cache: Cache,
    /// Database handle for health checks
    pub database: Arc<Database>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserRepository>, cache: Cache, database: Arc<Database>) -> Self {
        Self {
            users,
            cache,
            database,
        }
    }
}
