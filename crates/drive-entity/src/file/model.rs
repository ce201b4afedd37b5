//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::category::FileCategory;

/// A file record. The bytes live in external object storage under
/// `storage_key`; this row is the only link to them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// The file name (including extension).
    pub name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// File size in bytes (client-declared, reconciled on completion).
    pub size_bytes: i64,
    /// Key of the object in external storage. Immutable once set.
    pub storage_key: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// Containing folder (null for root-level files).
    pub folder_id: Option<Uuid>,
    /// Soft-delete flag; trashed files stay restorable until purged.
    pub is_deleted: bool,
    /// When the file record was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated (also the trash timestamp).
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Coarse category derived from the declared MIME type.
    pub fn category(&self) -> FileCategory {
        FileCategory::from_mime(&self.mime_type)
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Pre-generated file ID (also baked into the storage key).
    pub id: Uuid,
    /// The file name.
    pub name: String,
    /// Declared MIME type.
    pub mime_type: String,
    /// Declared size in bytes.
    pub size_bytes: i64,
    /// Key of the object in external storage.
    pub storage_key: String,
    /// The file owner.
    pub owner_id: Uuid,
    /// Containing folder (None for root level).
    pub folder_id: Option<Uuid>,
}
