//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use citadel_core::config::AuthConfig;
use citadel_core::error::AppError;
use citadel_core::types::id::UserId;

use super::claims::{Claims, TokenType};

/// Creates signed JWT access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Tokens returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_expires_at: DateTime<Utc>,
}

/// A standalone access token issued by a refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.jwt_access_ttl_minutes as i64),
            refresh_ttl: Duration::hours(config.jwt_refresh_ttl_hours as i64),
        }
    }

    /// Generate an access + refresh token pair for a user.
    pub fn generate_token_pair(&self, user_id: UserId) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let (access_token, access_expires_at) =
            self.sign(user_id, TokenType::Access, now, self.access_ttl)?;
        let (refresh_token, refresh_expires_at) =
            self.sign(user_id, TokenType::Refresh, now, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            access_expires_at,
            refresh_expires_at,
        })
    }

    /// Generate a standalone access token, e.g. after a refresh.
    pub fn generate_access_token(&self, user_id: UserId) -> Result<AccessToken, AppError> {
        let (access_token, expires_at) =
            self.sign(user_id, TokenType::Access, Utc::now(), self.access_ttl)?;
        Ok(AccessToken {
            access_token,
            token_type: "Bearer".to_string(),
            expires_at,
        })
    }

    fn sign(
        &self,
        user_id: UserId,
        token_type: TokenType,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let exp = now + ttl;
        let claims = Claims {
            sub: user_id,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {token_type:?} token: {e}")))?;
        Ok((token, exp))
    }
}
