//! JWT token decoding and validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use drive_core::config::AuthConfig;
use drive_core::{AppError, AppResult};

use super::claims::{Claims, TokenType};

/// Validates signed JWTs and extracts their claims.
///
/// Expired tokens are reported with the `TOKEN_EXPIRED` wire code so
/// clients can distinguish "refresh me" from "log in again".
#[derive(Clone)]
pub struct TokenDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
}

impl std::fmt::Debug for TokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDecoder").finish_non_exhaustive()
    }
}

impl TokenDecoder {
    /// Creates a decoder from the auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
        }
    }

    /// Validates an access token and returns its claims.
    pub fn decode_access(&self, token: &str) -> AppResult<Claims> {
        self.decode(token, TokenType::Access)
    }

    /// Validates a refresh token and returns its claims.
    pub fn decode_refresh(&self, token: &str) -> AppResult<Claims> {
        self.decode(token, TokenType::Refresh)
    }

    fn decode(&self, token: &str, expected: TokenType) -> AppResult<Claims> {
        let key = match expected {
            TokenType::Access => &self.access_key,
            TokenType::Refresh => &self.refresh_key,
        };
        let validation = Validation::new(Algorithm::HS256);
        let data = jsonwebtoken::decode::<Claims>(token, key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::unauthorized("token has expired").with_code("TOKEN_EXPIRED")
                }
                _ => AppError::unauthorized("invalid token"),
            }
        })?;
        if data.claims.token_type != expected {
            return Err(AppError::unauthorized("invalid token type"));
        }
        Ok(data.claims)
    }
}
