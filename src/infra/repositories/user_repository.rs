//! User repository implementation.
//!
//! Deletion is transactional: the dependent-notes check and the row delete
//! run in a single database transaction so a concurrent note create cannot
//! slip between them.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::conflict_or_db;
use super::entities::note::{self, Entity as NoteEntity};
use super::entities::user::{self, ActiveModel, Entity as UserEntity, Roles};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find user by exact username match
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Create a new user (active by default)
    async fn create(
        &self,
        username: String,
        password_hash: String,
        roles: Vec<String>,
    ) -> AppResult<User>;

    /// Overwrite username, roles and active flag; replace the stored
    /// password hash only when a new one is supplied
    async fn update(
        &self,
        id: Uuid,
        username: String,
        roles: Vec<String>,
        active: bool,
        password_hash: Option<String>,
    ) -> AppResult<User>;

    /// Delete a user, refusing while any note references it.
    /// Returns the deleted user for confirmation messages.
    async fn delete(&self, id: Uuid) -> AppResult<User>;

    /// List all users
    async fn list(&self) -> AppResult<Vec<User>>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn delete_in_txn(txn: &DatabaseTransaction, id: Uuid) -> AppResult<User> {
        // Authoritative referential check, inside the same transaction
        let dependents = NoteEntity::find()
            .filter(note::Column::Owner.eq(id))
            .count(txn)
            .await
            .map_err(AppError::from)?;

        if dependents > 0 {
            return Err(AppError::has_dependents("User has assigned notes"));
        }

        let model = UserEntity::find_by_id(id)
            .one(txn)
            .await
            .map_err(AppError::from)?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        UserEntity::delete_by_id(id)
            .exec(txn)
            .await
            .map_err(AppError::from)?;

        Ok(User::from(model))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(User::from))
    }

    async fn create(
        &self,
        username: String,
        password_hash: String,
        roles: Vec<String>,
    ) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(username),
            password_hash: Set(password_hash),
            roles: Set(Roles(roles)),
            active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, "username"))?;

        Ok(User::from(model))
    }

    async fn update(
        &self,
        id: Uuid,
        username: String,
        roles: Vec<String>,
        active: bool,
        password_hash: Option<String>,
    ) -> AppResult<User> {
        let user = UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let mut active_model: ActiveModel = user.into();
        active_model.username = Set(username);
        active_model.roles = Set(Roles(roles));
        active_model.active = Set(active);
        if let Some(hash) = password_hash {
            active_model.password_hash = Set(hash);
        }
        active_model.updated_at = Set(chrono::Utc::now());

        let model = active_model
            .update(&self.db)
            .await
            .map_err(|e| conflict_or_db(e, "username"))?;

        Ok(User::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<User> {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        match Self::delete_in_txn(&txn, id).await {
            Ok(user) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(user)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(User::from).collect())
    }
}
