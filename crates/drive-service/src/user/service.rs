//! Account registration, login, and token refresh.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drive_auth::jwt::{TokenDecoder, TokenEncoder, TokenPair};
use drive_auth::password::PasswordHasher;
use drive_core::config::{AuthConfig, StorageConfig};
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_database::repositories::UserRepository;
use drive_entity::user::model::{CreateUser, User};

/// Manages accounts and issues token pairs.
#[derive(Debug, Clone)]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    hasher: PasswordHasher,
    encoder: TokenEncoder,
    decoder: TokenDecoder,
    password_min_length: usize,
    default_storage_limit: i64,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        auth_config: &AuthConfig,
        storage_config: &StorageConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher: PasswordHasher::new(),
            encoder: TokenEncoder::new(auth_config),
            decoder: TokenDecoder::new(auth_config),
            password_min_length: auth_config.password_min_length,
            default_storage_limit: storage_config.default_storage_limit_bytes,
        }
    }

    /// Registers a new account and signs the user in.
    pub async fn register(
        &self,
        email: &str,
        name: &str,
        password: &str,
    ) -> AppResult<(User, TokenPair)> {
        let email = normalize_email(email)?;
        if name.trim().is_empty() {
            return Err(AppError::validation("Name cannot be empty"));
        }
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let password_hash = self.hasher.hash(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email,
                name: name.trim().to_owned(),
                password_hash,
                storage_limit: self.default_storage_limit,
            })
            .await?;

        info!(user_id = %user.id, "User registered");

        let tokens = self.encoder.issue_pair(user.id, &user.email)?;
        Ok((user, tokens))
    }

    /// Verifies credentials and signs the user in.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller; both yield `INVALID_CREDENTIALS`.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<(User, TokenPair)> {
        let email = normalize_email(email)?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(invalid_credentials)?;

        if !self.hasher.verify(password, &user.password_hash)? {
            return Err(invalid_credentials());
        }

        info!(user_id = %user.id, "User logged in");

        let tokens = self.encoder.issue_pair(user.id, &user.email)?;
        Ok((user, tokens))
    }

    /// Exchanges a valid refresh token for a fresh pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<(User, TokenPair)> {
        let claims = self.decoder.decode_refresh(refresh_token)?;
        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or_else(|| AppError::unauthorized("Account no longer exists"))?;

        let tokens = self.encoder.issue_pair(user.id, &user.email)?;
        Ok((user, tokens))
    }

    /// Loads the account behind an ID, for profile and storage readouts.
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found").with_code("USER_NOT_FOUND"))
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password").with_code("INVALID_CREDENTIALS")
}

fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    // Shape check only; deliverability is not our problem.
    let valid = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
    });
    if !valid {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(email)
}
