//! Application state for dependency injection.

use std::sync::Arc;

use common::{AppConfig, AppResult};
use user_service_lib::infra::Database;
use user_service_lib::service::UserService;

/// State shared across the persisted-variant handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserService>,
    pub database: Database,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create new app state.
    pub fn new(users: Arc<dyn UserService>, database: Database, config: AppConfig) -> Self {
        Self {
            users,
            database,
            config: Arc::new(config),
        }
    }

    /// Open the database, apply migrations and wire the user service.
    pub async fn connect(config: AppConfig) -> AppResult<Self> {
        let database = Database::connect(&config.database_url).await?;
        let users = user_service_lib::user_service(&database);
        Ok(Self::new(users, database, config))
    }
}
