//! Response bodies. All fields are camelCase on the wire; successful
//! responses are wrapped in [`ApiResponse`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use drive_core::traits::SignedUrl;
use drive_entity::file::category::FileCategory;
use drive_entity::file::model::File;
use drive_entity::folder::model::Folder;
use drive_entity::recent::model::RecentItem;
use drive_entity::resource::{ResourceType, ShareRole};
use drive_entity::share::link::LinkShare;
use drive_entity::share::model::Share;
use drive_entity::star::model::Star;
use drive_entity::user::model::User;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wraps `data` in a success envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Quota readout for `/api/users/storage`.
#[derive(Debug, Serialize)]
pub struct StorageUsageResponse {
    pub used: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub storage_used: i64,
    pub storage_limit: i64,
    pub storage_available: i64,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            storage_available: user.storage_available(),
            email: user.email,
            name: user.name,
            storage_used: user.storage_used,
            storage_limit: user.storage_limit,
            created_at: user.created_at,
        }
    }
}

/// Login, register, and refresh payload. Tokens also travel as HttpOnly
/// cookies; the body copies serve non-browser clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub category: FileCategory,
    pub size_bytes: i64,
    pub owner_id: Uuid,
    pub folder_id: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<File> for FileResponse {
    fn from(file: File) -> Self {
        Self {
            id: file.id,
            category: file.category(),
            name: file.name,
            mime_type: file.mime_type,
            size_bytes: file.size_bytes,
            owner_id: file.owner_id,
            folder_id: file.folder_id,
            is_deleted: file.is_deleted,
            created_at: file.created_at,
            updated_at: file.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderResponse {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
            owner_id: folder.owner_id,
            parent_id: folder.parent_id,
            is_deleted: folder.is_deleted,
            created_at: folder.created_at,
            updated_at: folder.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderContentsResponse {
    pub folder: Option<FolderResponse>,
    pub folders: Vec<FolderResponse>,
    pub files: Vec<FileResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedUrlResponse {
    pub url: String,
    pub expires_at: DateTime<Utc>,
}

impl From<SignedUrl> for SignedUrlResponse {
    fn from(url: SignedUrl) -> Self {
        Self {
            url: url.url,
            expires_at: url.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitUploadResponse {
    pub file: FileResponse,
    pub upload_url: SignedUrlResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub file: FileResponse,
    pub download_url: SignedUrlResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareResponse {
    pub id: Uuid,
    pub resource_type: ResourceType,
    pub resource_id: Uuid,
    pub grantee_user_id: Uuid,
    pub role: ShareRole,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Share> for ShareResponse {
    fn from(share: Share) -> Self {
        Self {
            id: share.id,
            resource_type: share.resource_type,
            resource_id: share.resource_id,
            grantee_user_id: share.grantee_user_id,
            role: share.role,
            created_by: share.created_by,
            created_at: share.created_at,
        }
    }
}

/// A grant joined with the grantee's identity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantResponse {
    #[serde(flatten)]
    pub share: ShareResponse,
    pub grantee_email: String,
    pub grantee_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedItemResponse {
    pub share: ShareResponse,
    pub file: Option<FileResponse>,
    pub folder: Option<FolderResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkShareResponse {
    pub id: Uuid,
    pub token: String,
    /// Frontend URL of the share page for this link.
    pub url: String,
    pub resource_type: ResourceType,
    pub resource_id: Uuid,
    pub has_password: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl LinkShareResponse {
    /// Builds the wire shape, deriving the share-page URL from the
    /// configured frontend base.
    pub fn new(link: LinkShare, frontend_url: &str) -> Self {
        Self {
            url: format!("{}/s/{}", frontend_url.trim_end_matches('/'), link.token),
            id: link.id,
            has_password: link.requires_password(),
            token: link.token,
            resource_type: link.resource_type,
            resource_id: link.resource_id,
            expires_at: link.expires_at,
            created_by: link.created_by,
            created_at: link.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedLinkResponse {
    pub resource_type: ResourceType,
    pub file: Option<FileResponse>,
    pub folder: Option<FolderResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarResponse {
    pub id: Uuid,
    pub resource_type: ResourceType,
    pub resource_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Star> for StarResponse {
    fn from(star: Star) -> Self {
        Self {
            id: star.id,
            resource_type: star.resource_type,
            resource_id: star.resource_id,
            created_at: star.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarredItemResponse {
    pub star: StarResponse,
    pub file: Option<FileResponse>,
    pub folder: Option<FolderResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentResponse {
    pub id: Uuid,
    pub resource_type: ResourceType,
    pub resource_id: Uuid,
    pub last_opened_at: DateTime<Utc>,
}

impl From<RecentItem> for RecentResponse {
    fn from(item: RecentItem) -> Self {
        Self {
            id: item.id,
            resource_type: item.resource_type,
            resource_id: item.resource_id,
            last_opened_at: item.last_opened_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentEntryResponse {
    pub item: RecentResponse,
    pub file: Option<FileResponse>,
    pub folder: Option<FolderResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashResponse {
    pub files: Vec<FileResponse>,
    pub folders: Vec<FolderResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub files: Vec<FileResponse>,
    pub folders: Vec<FolderResponse>,
}
