//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use citadel_core::types::id::UserId;

use super::role::UserRole;

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: UserId,
    /// Display name.
    pub name: String,
    pub role: UserRole,
    /// Unique login name.
    pub username: String,
    /// Argon2 password hash. Accounts without a hash cannot log in.
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Whether the account may authenticate with a password.
    pub fn can_login(&self) -> bool {
        self.is_active && self.password_hash.is_some()
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub username: String,
    pub role: UserRole,
    /// Pre-hashed password.
    pub password_hash: Option<String>,
}
