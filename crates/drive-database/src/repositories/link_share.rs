//! Link share repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_entity::resource::ResourceType;
use drive_entity::share::link::{CreateLinkShare, LinkShare};

/// Repository for public link shares, addressed by opaque token.
#[derive(Debug, Clone)]
pub struct LinkShareRepository {
    pool: PgPool,
}

impl LinkShareRepository {
    /// Create a new link share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a link share.
    pub async fn create(&self, data: &CreateLinkShare) -> AppResult<LinkShare> {
        sqlx::query_as::<_, LinkShare>(
            "INSERT INTO link_shares (token, resource_type, resource_id, password_hash, expires_at, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.token)
        .bind(data.resource_type)
        .bind(data.resource_id)
        .bind(&data.password_hash)
        .bind(data.expires_at)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create link share", e))
    }

    /// Find a link share by its token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<LinkShare>> {
        sqlx::query_as::<_, LinkShare>("SELECT * FROM link_shares WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link share", e))
    }

    /// Find a link share by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LinkShare>> {
        sqlx::query_as::<_, LinkShare>("SELECT * FROM link_shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link share", e))
    }

    /// All link shares on a resource.
    pub async fn find_for_resource(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<Vec<LinkShare>> {
        sqlx::query_as::<_, LinkShare>(
            "SELECT * FROM link_shares WHERE resource_type = $1 AND resource_id = $2 \
             ORDER BY created_at ASC",
        )
        .bind(resource_type)
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list link shares", e))
    }

    /// All link shares a user has created, newest first.
    pub async fn find_by_creator(&self, creator: Uuid) -> AppResult<Vec<LinkShare>> {
        sqlx::query_as::<_, LinkShare>(
            "SELECT * FROM link_shares WHERE created_by = $1 ORDER BY created_at DESC",
        )
        .bind(creator)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list link shares", e))
    }

    /// Revoke a link share.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM link_shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete link share", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove all link shares on a resource. Called when the resource is purged.
    pub async fn delete_for_resource(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM link_shares WHERE resource_type = $1 AND resource_id = $2")
                .bind(resource_type)
                .bind(resource_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to clean up link shares", e)
                })?;
        Ok(result.rows_affected())
    }
}
