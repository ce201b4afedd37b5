//! Recent-items repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_entity::recent::model::RecentItem;
use drive_entity::resource::ResourceType;

/// Repository for last-opened tracking rows.
#[derive(Debug, Clone)]
pub struct RecentRepository {
    pool: PgPool,
}

impl RecentRepository {
    /// Create a new recent-items repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record that a user opened a resource. One row per (user, resource)
    /// tuple; repeated opens just refresh the timestamp.
    pub async fn touch(
        &self,
        user_id: Uuid,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<RecentItem> {
        sqlx::query_as::<_, RecentItem>(
            "INSERT INTO recent_items (user_id, resource_type, resource_id, last_opened_at) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (user_id, resource_type, resource_id) \
             DO UPDATE SET last_opened_at = NOW() RETURNING *",
        )
        .bind(user_id)
        .bind(resource_type)
        .bind(resource_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to record open", e))
    }

    /// A user's most recently opened resources.
    pub async fn find_for_user(&self, user_id: Uuid, limit: i64) -> AppResult<Vec<RecentItem>> {
        sqlx::query_as::<_, RecentItem>(
            "SELECT * FROM recent_items WHERE user_id = $1 \
             ORDER BY last_opened_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list recent items", e))
    }

    /// Remove tracking rows for a resource. Called when the resource is purged.
    pub async fn delete_for_resource(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM recent_items WHERE resource_type = $1 AND resource_id = $2")
                .bind(resource_type)
                .bind(resource_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to clean up recent items", e)
                })?;
        Ok(result.rows_affected())
    }
}
