//! User repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use citadel_core::error::{AppError, ErrorKind};
use citadel_core::result::AppResult;
use citadel_core::types::id::{GuardId, ResidentId, UserId};
use citadel_entity::User;
use citadel_entity::user::CreateUser;

use super::map_unique;
use crate::store::{NewProfile, UserStore};

/// Repository for user accounts and the profile rows created with them.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by username", e)
            })
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY created_at, username")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list users", e))
    }

    async fn create_user(&self, data: &CreateUser, profile: NewProfile) -> AppResult<User> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, role, username, password_hash) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING *",
        )
        .bind(UserId::new())
        .bind(&data.name)
        .bind(data.role)
        .bind(&data.username)
        .bind(&data.password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            map_unique(
                e,
                "users_username_key",
                || AppError::conflict(format!("Username '{}' already exists", data.username)),
                "Failed to create user",
            )
        })?;

        match profile {
            NewProfile::Resident { phone } => {
                sqlx::query("INSERT INTO residents (id, user_id, phone) VALUES ($1, $2, $3)")
                    .bind(ResidentId::new())
                    .bind(user.id)
                    .bind(&phone)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(
                            ErrorKind::Database,
                            "Failed to create resident profile",
                            e,
                        )
                    })?;
            }
            NewProfile::Guard => {
                sqlx::query("INSERT INTO guards (id, user_id) VALUES ($1, $2)")
                    .bind(GuardId::new())
                    .bind(user.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| {
                        AppError::with_source(ErrorKind::Database, "Failed to create guard profile", e)
                    })?;
            }
            NewProfile::None => {}
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit user creation", e)
        })?;

        Ok(user)
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE users SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }
}
