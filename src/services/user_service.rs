//! User service - Handles user-related business logic.
//!
//! Orchestrates validation, the uniqueness and referential guards, password
//! hashing, and the repository into the four user operations.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::is_valid_role;
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::{NoteRepository, UserRepository};
use crate::services::guards;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users; empty collection is a not-found failure
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create a new user with a hashed password
    async fn create_user(
        &self,
        username: String,
        password: String,
        roles: Vec<String>,
    ) -> AppResult<User>;

    /// Update username, roles and active flag; re-hash the password only
    /// when a new one is supplied
    async fn update_user(
        &self,
        id: Uuid,
        username: String,
        roles: Vec<String>,
        active: bool,
        password: Option<String>,
    ) -> AppResult<User>;

    /// Delete a user, refused while notes still reference it.
    /// Returns the deleted user for the confirmation message.
    async fn delete_user(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of UserService.
pub struct UserManager {
    users: Arc<dyn UserRepository>,
    notes: Arc<dyn NoteRepository>,
}

impl UserManager {
    /// Create new user service instance
    pub fn new(users: Arc<dyn UserRepository>, notes: Arc<dyn NoteRepository>) -> Self {
        Self { users, notes }
    }

    fn validate_fields(username: &str, roles: &[String]) -> AppResult<()> {
        if username.is_empty() {
            return Err(AppError::validation("Username is required"));
        }
        if roles.is_empty() {
            return Err(AppError::validation("At least one role is required"));
        }
        if let Some(unknown) = roles.iter().find(|r| !is_valid_role(r)) {
            return Err(AppError::validation(format!("Unknown role: {}", unknown)));
        }
        Ok(())
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<User>> {
        let users = self.users.list().await?;
        if users.is_empty() {
            return Err(AppError::not_found("No users found"));
        }
        Ok(users)
    }

    async fn create_user(
        &self,
        username: String,
        password: String,
        roles: Vec<String>,
    ) -> AppResult<User> {
        Self::validate_fields(&username, &roles)?;
        if password.is_empty() {
            return Err(AppError::validation("Password is required"));
        }

        let check = guards::check_username_unique(self.users.as_ref(), &username, None).await?;
        if check.is_duplicate {
            return Err(AppError::conflict("username"));
        }

        let password_hash = Password::new(&password)?.into_string();

        let user = self.users.create(username, password_hash, roles).await?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    async fn update_user(
        &self,
        id: Uuid,
        username: String,
        roles: Vec<String>,
        active: bool,
        password: Option<String>,
    ) -> AppResult<User> {
        Self::validate_fields(&username, &roles)?;

        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let check =
            guards::check_username_unique(self.users.as_ref(), &username, Some(id)).await?;
        if check.is_duplicate {
            return Err(AppError::conflict("username"));
        }

        // Absent or empty password leaves the stored hash untouched
        let password_hash = match password {
            Some(p) if !p.is_empty() => Some(Password::new(&p)?.into_string()),
            _ => None,
        };

        let user = self
            .users
            .update(id, username, roles, active, password_hash)
            .await?;
        tracing::info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<User> {
        // Fast-path guard; the repository re-checks inside the delete
        // transaction, which is the authoritative answer under races
        if !guards::can_delete_user(self.notes.as_ref(), id).await? {
            return Err(AppError::has_dependents("User has assigned notes"));
        }

        let user = self.users.delete(id).await?;
        tracing::info!(user_id = %user.id, "user deleted");
        Ok(user)
    }
}
