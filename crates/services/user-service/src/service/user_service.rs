//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{StoredUser, User, UserChanges};

use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Store a validated record; fails with `Conflict` on a taken email
    async fn create_user(&self, user: User) -> AppResult<StoredUser>;

    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<StoredUser>;

    /// List all users, newest first
    async fn list_users(&self) -> AppResult<Vec<StoredUser>>;

    /// Replace every field of an existing user
    async fn replace_user(&self, id: i64, user: User) -> AppResult<StoredUser>;

    /// Apply a partial update to an existing user
    async fn patch_user(&self, id: i64, changes: UserChanges) -> AppResult<StoredUser>;

    /// Delete user by ID
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Reject an email that belongs to a different record.
    async fn ensure_email_free(&self, email: &str, owner: Option<i64>) -> AppResult<()> {
        match self.repo.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::conflict("Email")),
            _ => Ok(()),
        }
    }

    async fn save_existing(&self, id: i64, user: User) -> AppResult<StoredUser> {
        self.ensure_email_free(&user.email, Some(id)).await?;
        let stored = self.repo.update(id, user).await?;
        info!(user_id = stored.id, "User updated");
        Ok(stored)
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, user: User) -> AppResult<StoredUser> {
        self.ensure_email_free(&user.email, None).await?;

        let stored = self.repo.create(user).await?;
        info!(user_id = stored.id, "User created");
        Ok(stored)
    }

    async fn get_user(&self, id: i64) -> AppResult<StoredUser> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<StoredUser>> {
        self.repo.list().await
    }

    async fn replace_user(&self, id: i64, user: User) -> AppResult<StoredUser> {
        self.get_user(id).await?;
        self.save_existing(id, user).await
    }

    async fn patch_user(&self, id: i64, changes: UserChanges) -> AppResult<StoredUser> {
        let current = self.get_user(id).await?;
        self.save_existing(id, current.merged(changes)).await
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }
}
