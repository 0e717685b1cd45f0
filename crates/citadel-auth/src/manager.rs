//! Credential flows: login, refresh, password change.

use std::sync::Arc;

use tracing::{info, warn};

use citadel_core::error::AppError;
use citadel_core::result::AppResult;
use citadel_database::store::UserStore;
use citadel_entity::User;

use crate::jwt::{AccessToken, JwtDecoder, JwtEncoder, TokenPair};
use crate::password::{PasswordHasher, PasswordValidator};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Authenticates users against the user store and issues tokens.
#[derive(Debug, Clone)]
pub struct AuthManager {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl AuthManager {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
            encoder,
            decoder,
        }
    }

    /// Verify credentials and issue an access + refresh token pair.
    ///
    /// Unknown users, inactive accounts, accounts without a password and
    /// wrong passwords all fail with the same `Unauthorized` error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenPair> {
        let user = self.verify_credentials(username, password).await?;
        let pair = self.encoder.generate_token_pair(user.id)?;
        info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(pair)
    }

    /// Exchange a refresh token for a new access token with the same subject.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<AccessToken> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let user = self
            .users
            .find_user(claims.sub)
            .await?
            .filter(|u| u.is_active)
            .ok_or_else(|| AppError::unauthorized("Invalid token"))?;

        self.encoder.generate_access_token(user.id)
    }

    /// Replace a user's password after re-verifying the current one.
    pub async fn change_password(
        &self,
        username: &str,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        let user = self.verify_credentials(username, current_password).await?;

        self.validator
            .validate_not_same(current_password, new_password)?;
        self.validator.validate(new_password, &user.username)?;

        let hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user.id, &hash).await?;

        info!(user_id = %user.id, "Password changed");
        Ok(())
    }

    /// Hash a password for a newly provisioned account.
    pub fn hash_new_password(&self, username: &str, password: &str) -> AppResult<String> {
        self.validator.validate(password, username)?;
        self.hasher.hash_password(password)
    }

    pub fn decoder(&self) -> &JwtDecoder {
        &self.decoder
    }

    async fn verify_credentials(&self, username: &str, password: &str) -> AppResult<User> {
        let user = self
            .users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        let Some(hash) = user.password_hash.as_deref().filter(|_| user.is_active) else {
            warn!(user_id = %user.id, "Login refused for inactive or passwordless account");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(user)
    }
}
