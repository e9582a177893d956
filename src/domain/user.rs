//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::ROLE_EMPLOYEE;

/// User domain entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role labels; every user carries at least one
    pub roles: Vec<String>,
    /// Inactive users keep their records but may no longer act
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the baseline role and active flag set
    pub fn new(id: Uuid, username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            password_hash,
            roles: vec![ROLE_EMPLOYEE.to_string()],
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the user carries a given role
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

/// User response (safe to return to client, hash stripped)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Login name
    #[schema(example = "alice")]
    pub username: String,
    /// Role labels
    #[schema(example = json!(["Employee"]))]
    pub roles: Vec<String>,
    /// Whether the account may act
    pub active: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            roles: user.roles,
            active: user.active,
            created_at: user.created_at,
        }
    }
}
