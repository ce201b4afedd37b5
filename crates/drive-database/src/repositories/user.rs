//! User repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_entity::user::model::{CreateUser, User};

/// Repository for user records and storage accounting.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new user account.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (email, name, password_hash, storage_limit) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.storage_limit)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict("An account with this email already exists")
                    .with_code("USER_EXISTS")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    /// Find a user by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user", e))
    }

    /// Find a user by email (lowercased at the call site).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    /// Atomically reserve storage for an upload. The conditional UPDATE
    /// succeeds only when the new usage stays within the limit, so two
    /// concurrent uploads cannot both slip under the cap.
    ///
    /// Returns `None` when the reservation would exceed the limit.
    pub async fn reserve_storage(&self, user_id: Uuid, bytes: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET storage_used = storage_used + $2, updated_at = NOW() \
             WHERE id = $1 AND storage_used + $2 <= storage_limit RETURNING *",
        )
        .bind(user_id)
        .bind(bytes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to reserve storage", e))
    }

    /// Release previously reserved storage. Clamped at zero so repeated
    /// releases never drive usage negative.
    pub async fn release_storage(&self, user_id: Uuid, bytes: i64) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET storage_used = GREATEST(storage_used - $2, 0), updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(user_id)
        .bind(bytes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release storage", e))?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }
}
