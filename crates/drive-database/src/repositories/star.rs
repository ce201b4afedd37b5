//! Star repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_entity::resource::ResourceType;
use drive_entity::star::model::Star;

/// Repository for per-user starred resources.
#[derive(Debug, Clone)]
pub struct StarRepository {
    pool: PgPool,
}

impl StarRepository {
    /// Create a new star repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Star a resource for a user.
    pub async fn create(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<Star> {
        sqlx::query_as::<_, Star>(
            "INSERT INTO stars (user_id, resource_type, resource_id) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(resource_type)
        .bind(resource_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("stars_user_resource_key") =>
            {
                AppError::conflict("Resource is already starred").with_code("ALREADY_STARRED")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create star", e),
        })
    }

    /// Unstar a resource for a user.
    pub async fn delete(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM stars WHERE user_id = $1 AND resource_type = $2 AND resource_id = $3",
        )
        .bind(user_id)
        .bind(resource_type)
        .bind(resource_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete star", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// All stars for a user, newest first.
    pub async fn find_for_user(&self, user_id: Uuid) -> AppResult<Vec<Star>> {
        sqlx::query_as::<_, Star>(
            "SELECT * FROM stars WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list stars", e))
    }

    /// Remove all stars on a resource. Called when the resource is purged.
    pub async fn delete_for_resource(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM stars WHERE resource_type = $1 AND resource_id = $2")
                .bind(resource_type)
                .bind(resource_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to clean up stars", e)
                })?;
        Ok(result.rows_affected())
    }
}
