//! Share repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_entity::resource::ResourceType;
use drive_entity::share::model::{CreateShare, Share};

/// Repository for explicit user-to-user share grants.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a share grant.
    pub async fn create(&self, data: &CreateShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares (resource_type, resource_id, grantee_user_id, role, created_by) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.resource_type)
        .bind(data.resource_id)
        .bind(data.grantee_user_id)
        .bind(data.role)
        .bind(data.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("shares_resource_grantee_key") =>
            {
                AppError::conflict("This resource is already shared with that user")
                    .with_code("ALREADY_SHARED")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create share", e),
        })
    }

    /// Find a share by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    /// All grants on a resource.
    pub async fn find_for_resource(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE resource_type = $1 AND resource_id = $2 \
             ORDER BY created_at ASC",
        )
        .bind(resource_type)
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))
    }

    /// The grant a specific user holds on a resource, if any.
    pub async fn find_grant(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
        grantee_user_id: Uuid,
    ) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares \
             WHERE resource_type = $1 AND resource_id = $2 AND grantee_user_id = $3",
        )
        .bind(resource_type)
        .bind(resource_id)
        .bind(grantee_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find grant", e))
    }

    /// All grants where the given user is the grantee.
    pub async fn find_for_grantee(&self, grantee_user_id: Uuid) -> AppResult<Vec<Share>> {
        sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE grantee_user_id = $1 ORDER BY created_at DESC",
        )
        .bind(grantee_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list received shares", e)
        })
    }

    /// Revoke a grant.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove all grants on a resource. Called when the resource is purged.
    pub async fn delete_for_resource(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM shares WHERE resource_type = $1 AND resource_id = $2")
                .bind(resource_type)
                .bind(resource_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to clean up shares", e)
                })?;
        Ok(result.rows_affected())
    }
}
