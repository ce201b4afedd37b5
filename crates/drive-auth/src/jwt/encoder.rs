//! JWT token encoding.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use uuid::Uuid;

use drive_core::config::AuthConfig;
use drive_core::error::ErrorKind;
use drive_core::{AppError, AppResult};

use super::claims::{Claims, TokenType};

/// An access/refresh token pair issued on register, login, and refresh.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds, for cookie Max-Age.
    pub access_ttl_seconds: i64,
    /// Refresh token lifetime in seconds.
    pub refresh_ttl_seconds: i64,
}

/// Issues signed JWTs. Access and refresh tokens are signed with
/// separate secrets so a leaked access secret cannot mint refresh
/// tokens.
#[derive(Clone)]
pub struct TokenEncoder {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenEncoder {
    /// Creates an encoder from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_ttl_minutes as i64),
            refresh_ttl: Duration::hours(config.refresh_ttl_hours as i64),
        }
    }

    /// Issues a fresh access/refresh pair for the given user.
    pub fn issue_pair(&self, user_id: Uuid, email: &str) -> AppResult<TokenPair> {
        let access_token = self.issue(user_id, email, TokenType::Access)?;
        let refresh_token = self.issue(user_id, email, TokenType::Refresh)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            access_ttl_seconds: self.access_ttl.num_seconds(),
            refresh_ttl_seconds: self.refresh_ttl.num_seconds(),
        })
    }

    /// Issues a single token of the given type.
    pub fn issue(&self, user_id: Uuid, email: &str, token_type: TokenType) -> AppResult<String> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: user_id,
            email: email.to_owned(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            token_type,
        };
        let key = match token_type {
            TokenType::Access => &self.access_key,
            TokenType::Refresh => &self.refresh_key,
        };
        jsonwebtoken::encode(&Header::default(), &claims, key)
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "failed to sign token", e))
    }
}
