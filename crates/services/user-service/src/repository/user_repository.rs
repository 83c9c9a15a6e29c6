//! User repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{StoredUser, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence collaborator for user records.
///
/// Email uniqueness is enforced by the store itself; a violating write
/// returns [`AppError::Conflict`].
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<StoredUser>>;

    /// Find user by email address (exact match)
    async fn find_by_email(&self, email: &str) -> AppResult<Option<StoredUser>>;

    /// Insert a new record, assigning id and timestamps
    async fn create(&self, user: User) -> AppResult<StoredUser>;

    /// Overwrite the fields of an existing record and bump `updated_at`
    async fn update(&self, id: i64, user: User) -> AppResult<StoredUser>;

    /// Delete user by ID
    async fn delete(&self, id: i64) -> AppResult<()>;

    /// List all users, newest first
    async fn list(&self) -> AppResult<Vec<StoredUser>>;
}

/// SeaORM-backed implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique index violations become conflicts, everything else stays a database error.
fn write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("Email"),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<StoredUser>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(StoredUser::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<StoredUser>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(StoredUser::from))
    }

    async fn create(&self, user: User) -> AppResult<StoredUser> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: NotSet,
            name: Set(user.name),
            email: Set(user.email),
            age: Set(user.age),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(write_error)?;
        Ok(StoredUser::from(model))
    }

    async fn update(&self, id: i64, user: User) -> AppResult<StoredUser> {
        let existing = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(user.name);
        active.email = Set(user.email);
        active.age = Set(user.age);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await.map_err(write_error)?;
        Ok(StoredUser::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<StoredUser>> {
        let models = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .order_by_desc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(StoredUser::from).collect())
    }
}
