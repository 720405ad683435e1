//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::{CategoryStore, Database, UserStore};
use crate::jobs::JobDispatcher;
use crate::services::{UserAdmin, UserService};

/// Application state containing all services.
#[derive(Clone)]
pub struct AppState {
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Database connection
    pub database: Arc<Database>,
    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create application state from the database, job queue and config.
    pub fn from_config(
        database: Arc<Database>,
        jobs: Arc<dyn JobDispatcher>,
        config: Config,
    ) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let categories = Arc::new(CategoryStore::new(database.get_connection()));
        let user_service = Arc::new(UserAdmin::new(users, categories, jobs, config.clone()));

        Self {
            user_service,
            database,
            config,
        }
    }

    /// Create application state with manually injected services (tests).
    pub fn new(
        user_service: Arc<dyn UserService>,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            user_service,
            database,
            config,
        }
    }
}
