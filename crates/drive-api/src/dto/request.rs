//! Request bodies and query parameters. All fields are camelCase on the
//! wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;

use drive_entity::file::category::FileCategory;
use drive_entity::resource::{ResourceType, ShareRole};

/// Distinguishes an absent field from an explicit `null`.
///
/// `#[serde(default, deserialize_with = "double_option")]` turns an
/// absent field into `None` (leave alone) and `"field": null` into
/// `Some(None)` (clear it).
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Body fallback for clients that do not carry the refresh cookie.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    pub parent_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolderRequest {
    pub name: Option<String>,
    /// Absent leaves the parent alone; `null` moves to the root.
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InitUploadRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,
    pub mime_type: String,
    #[validate(range(min = 1, message = "Size must be positive"))]
    pub size_bytes: i64,
    pub folder_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUploadRequest {
    pub file_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFileRequest {
    pub name: Option<String>,
    /// Absent leaves the folder alone; `null` moves to the root.
    #[serde(default, deserialize_with = "double_option")]
    pub folder_id: Option<Option<Uuid>>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateShareRequest {
    pub resource_type: ResourceType,
    pub resource_id: Uuid,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub role: ShareRole,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkShareRequest {
    pub resource_type: ResourceType,
    pub resource_id: Uuid,
    pub password: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Query parameters for public link resolution.
#[derive(Debug, Deserialize)]
pub struct LinkPasswordQuery {
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarRequest {
    pub resource_type: ResourceType,
    pub resource_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchRecentRequest {
    pub resource_type: ResourceType,
    pub resource_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct RecentListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    /// Narrow to `file` or `folder`.
    #[serde(rename = "type")]
    pub resource_type: Option<ResourceType>,
    /// Narrow files by category; implies a file-only search.
    pub category: Option<FileCategory>,
}
