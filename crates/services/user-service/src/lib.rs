//! User Service Library
//!
//! This crate owns the persisted user records: the SeaORM entity, schema
//! migrations, the repository and the service that enforces email
//! uniqueness.

pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

/// Build the user service on top of an open database.
pub fn user_service(db: &Database) -> Arc<dyn UserService> {
    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    Arc::new(UserManager::new(user_repo))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(
    database_url: &str,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect_without_migrations(database_url).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}
