//! File repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_entity::file::model::{CreateFile, File};

use super::folder::escape_like;

/// Repository for file metadata rows. Object bytes live in the storage
/// backend; this table only tracks them.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new file record. The ID is generated by the caller so the
    /// storage key can embed it before the row exists.
    pub async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, name, mime_type, size_bytes, storage_key, owner_id, folder_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.id)
        .bind(&data.name)
        .bind(&data.mime_type)
        .bind(data.size_bytes)
        .bind(&data.storage_key)
        .bind(data.owner_id)
        .bind(data.folder_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    /// Find a file by ID, deleted or not.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    /// List a user's active files in a folder (`None` means the root level).
    pub async fn list_by_folder(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE owner_id = $1 AND folder_id IS NOT DISTINCT FROM $2 AND is_deleted = FALSE \
             ORDER BY name ASC",
        )
        .bind(owner_id)
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// List active files in a folder regardless of owner.
    /// Used when a grantee browses inside a shared folder.
    pub async fn list_by_folder_any_owner(&self, folder_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE folder_id = $1 AND is_deleted = FALSE ORDER BY name ASC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    /// Rename a file.
    pub async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Move a file to a different folder (`None` moves it to the root level).
    pub async fn move_to_folder(&self, id: Uuid, folder_id: Option<Uuid>) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET folder_id = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(folder_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Correct the recorded size after the storage backend reports the
    /// actual object size on upload completion.
    pub async fn update_size(&self, id: Uuid, size_bytes: i64) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET size_bytes = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(size_bytes)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file size", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// Flip the soft-delete flag. Also bumps `updated_at`, which the trash
    /// sweep uses as the deletion timestamp.
    pub async fn set_deleted(&self, id: Uuid, deleted: bool) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET is_deleted = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(deleted)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    /// List a user's trashed files, most recently trashed first.
    pub async fn list_trashed(&self, owner_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 AND is_deleted = TRUE \
             ORDER BY updated_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list trash", e))
    }

    /// Files trashed before the cutoff, for the scheduled sweep.
    pub async fn find_deleted_before(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE is_deleted = TRUE AND updated_at < $1",
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find expired files", e)
        })
    }

    /// All files anywhere under a folder subtree, deleted or not. Used when
    /// purging a trashed folder so storage objects and quota can be settled
    /// before the rows cascade away.
    pub async fn find_in_folder_tree(&self, root_folder_id: Uuid) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "WITH RECURSIVE subtree AS (\
                SELECT id FROM folders WHERE id = $1 \
                UNION ALL \
                SELECT f.id FROM folders f JOIN subtree s ON f.parent_id = s.id\
             ) \
             SELECT files.* FROM files JOIN subtree ON files.folder_id = subtree.id",
        )
        .bind(root_folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to collect folder contents", e)
        })
    }

    /// Search active files by name, case-insensitively.
    pub async fn search(&self, owner_id: Uuid, query: &str) -> AppResult<Vec<File>> {
        let pattern = format!("%{}%", escape_like(query));
        sqlx::query_as::<_, File>(
            "SELECT * FROM files \
             WHERE owner_id = $1 AND is_deleted = FALSE AND name ILIKE $2 \
             ORDER BY name ASC LIMIT 100",
        )
        .bind(owner_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search files", e))
    }

    /// Hard-delete a file row. The caller settles storage and quota first.
    pub async fn delete_hard(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}
