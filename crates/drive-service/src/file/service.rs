//! File operations: upload initiation and completion, downloads, and
//! metadata CRUD. The server never touches file bytes; clients PUT and
//! GET against signed URLs minted here.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use drive_core::config::StorageConfig;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::traits::{ObjectStore, SignedUrl};
use drive_database::repositories::{
    FileRepository, FolderRepository, RecentRepository, UserRepository,
};
use drive_entity::file::model::{CreateFile, File};
use drive_entity::resource::{ResourceType, ShareRole};

use crate::context::RequestContext;
use crate::share::access::AccessResolver;

/// Manages file records and the direct-to-storage transfer flows.
#[derive(Debug, Clone)]
pub struct FileService {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    user_repo: Arc<UserRepository>,
    recent_repo: Arc<RecentRepository>,
    resolver: AccessResolver,
    store: Arc<dyn ObjectStore>,
    max_upload_size: i64,
    upload_url_ttl: Duration,
    download_url_ttl: Duration,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
        recent_repo: Arc<RecentRepository>,
        resolver: AccessResolver,
        store: Arc<dyn ObjectStore>,
        config: &StorageConfig,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            user_repo,
            recent_repo,
            resolver,
            store,
            max_upload_size: config.max_upload_size_bytes,
            upload_url_ttl: Duration::from_secs(config.upload_url_ttl_seconds),
            download_url_ttl: Duration::from_secs(config.download_url_ttl_seconds),
        }
    }

    /// Starts an upload: reserves quota, records the file, and mints a
    /// signed PUT URL for the client.
    ///
    /// The quota reservation is a conditional UPDATE, so two concurrent
    /// uploads cannot both squeeze under the limit. If recording the file
    /// fails after the reservation, the reservation is rolled back.
    pub async fn init_upload(
        &self,
        ctx: &RequestContext,
        name: &str,
        mime_type: &str,
        size_bytes: i64,
        folder_id: Option<Uuid>,
    ) -> AppResult<(File, SignedUrl)> {
        let name = validate_file_name(name)?;
        if size_bytes <= 0 {
            return Err(AppError::validation("File size must be positive"));
        }
        if size_bytes > self.max_upload_size {
            return Err(AppError::validation(format!(
                "File exceeds the maximum upload size of {} bytes",
                self.max_upload_size
            ))
            .with_code("FILE_TOO_LARGE"));
        }
        let mime_type = normalize_mime(mime_type);

        if let Some(folder_id) = folder_id {
            let folder = self
                .folder_repo
                .find_by_id(folder_id)
                .await?
                .filter(|f| !f.is_deleted)
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            if folder.owner_id != ctx.user_id {
                let role = self
                    .resolver
                    .resolve_folder_access(ctx.user_id, &folder)
                    .await?;
                if role != Some(ShareRole::Editor) {
                    return Err(access_denied());
                }
            }
        }

        self.user_repo
            .reserve_storage(ctx.user_id, size_bytes)
            .await?
            .ok_or_else(|| {
                AppError::forbidden("Not enough storage space left")
                    .with_code("STORAGE_LIMIT_EXCEEDED")
            })?;

        let file_id = Uuid::new_v4();
        let storage_key = storage_key(ctx.user_id, file_id, &name);
        let create = CreateFile {
            id: file_id,
            name,
            mime_type,
            size_bytes,
            storage_key,
            owner_id: ctx.user_id,
            folder_id,
        };

        let file = match self.file_repo.create(&create).await {
            Ok(file) => file,
            Err(e) => {
                if let Err(release_err) =
                    self.user_repo.release_storage(ctx.user_id, size_bytes).await
                {
                    warn!(
                        user_id = %ctx.user_id,
                        error = %release_err,
                        "Failed to roll back quota reservation"
                    );
                }
                return Err(e);
            }
        };

        let upload_url = self
            .store
            .signed_upload_url(&file.storage_key, &file.mime_type, self.upload_url_ttl)
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            size_bytes,
            "Upload initiated"
        );

        Ok((file, upload_url))
    }

    /// Finalizes an upload after the client PUT.
    ///
    /// The object must exist in storage; its actual size is reconciled
    /// against what the client declared, adjusting the quota by the
    /// difference. An upload whose true size no longer fits is discarded
    /// entirely.
    pub async fn complete_upload(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .filter(|f| !f.is_deleted)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if file.owner_id != ctx.user_id {
            return Err(access_denied());
        }

        let meta = self.store.head(&file.storage_key).await?.ok_or_else(|| {
            AppError::not_found("No uploaded object found for this file")
                .with_code("OBJECT_NOT_FOUND")
        })?;

        let delta = meta.size_bytes - file.size_bytes;
        if delta > 0 {
            let reserved = self.user_repo.reserve_storage(file.owner_id, delta).await?;
            if reserved.is_none() {
                self.discard_upload(&file).await;
                return Err(AppError::forbidden(
                    "Uploaded object is larger than declared and exceeds your storage limit",
                )
                .with_code("STORAGE_LIMIT_EXCEEDED"));
            }
        } else if delta < 0 {
            self.user_repo.release_storage(file.owner_id, -delta).await?;
        }

        let file = if delta != 0 {
            self.file_repo.update_size(file_id, meta.size_bytes).await?
        } else {
            file
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            size_bytes = file.size_bytes,
            "Upload completed"
        );
        Ok(file)
    }

    /// Mints a signed download URL and records the open.
    pub async fn download(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<(File, SignedUrl)> {
        let file = self.require_view(ctx, file_id).await?;

        let url = self
            .store
            .signed_download_url(&file.storage_key, &file.name, self.download_url_ttl)
            .await?;

        self.recent_repo
            .touch(ctx.user_id, ResourceType::File, file.id)
            .await?;

        Ok((file, url))
    }

    /// Loads a file the user can at least view.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        self.require_view(ctx, file_id).await
    }

    /// Renames and/or moves a file. `new_folder` uses double-Option patch
    /// semantics like folder moves.
    pub async fn update_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: Option<&str>,
        new_folder: Option<Option<Uuid>>,
    ) -> AppResult<File> {
        let mut file = self.require_edit(ctx, file_id).await?;

        if let Some(target) = new_folder {
            if let Some(folder_id) = target {
                let folder = self
                    .folder_repo
                    .find_by_id(folder_id)
                    .await?
                    .filter(|f| !f.is_deleted)
                    .ok_or_else(|| AppError::not_found("Destination folder not found"))?;
                if folder.owner_id != ctx.user_id {
                    let role = self
                        .resolver
                        .resolve_folder_access(ctx.user_id, &folder)
                        .await?;
                    if role != Some(ShareRole::Editor) {
                        return Err(access_denied());
                    }
                }
            }
            file = self.file_repo.move_to_folder(file_id, target).await?;
            info!(user_id = %ctx.user_id, file_id = %file_id, "File moved");
        }

        if let Some(name) = new_name {
            let name = validate_file_name(name)?;
            file = self.file_repo.rename(file_id, &name).await?;
            info!(user_id = %ctx.user_id, file_id = %file_id, "File renamed");
        }

        Ok(file)
    }

    /// Moves a file to the trash and frees its quota. Restoring from the
    /// trash re-reserves it.
    pub async fn delete_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self.require_edit(ctx, file_id).await?;

        let file = self.file_repo.set_deleted(file.id, true).await?;
        self.user_repo
            .release_storage(file.owner_id, file.size_bytes)
            .await?;

        info!(user_id = %ctx.user_id, file_id = %file_id, "File trashed");
        Ok(file)
    }

    async fn require_view(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .filter(|f| !f.is_deleted)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if file.owner_id == ctx.user_id {
            return Ok(file);
        }
        if self
            .resolver
            .resolve_file_access(ctx.user_id, &file)
            .await?
            .is_some()
        {
            return Ok(file);
        }
        Err(access_denied())
    }

    async fn require_edit(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .file_repo
            .find_by_id(file_id)
            .await?
            .filter(|f| !f.is_deleted)
            .ok_or_else(|| AppError::not_found("File not found"))?;
        if file.owner_id == ctx.user_id {
            return Ok(file);
        }
        if self
            .resolver
            .resolve_file_access(ctx.user_id, &file)
            .await?
            == Some(ShareRole::Editor)
        {
            return Ok(file);
        }
        Err(access_denied())
    }

    /// Best-effort cleanup of a failed upload: object, row, and the
    /// original reservation.
    async fn discard_upload(&self, file: &File) {
        if let Err(e) = self.store.delete(&file.storage_key).await {
            warn!(file_id = %file.id, error = %e, "Failed to delete oversized object");
        }
        if let Err(e) = self.file_repo.delete_hard(file.id).await {
            warn!(file_id = %file.id, error = %e, "Failed to delete file record");
        }
        if let Err(e) = self
            .user_repo
            .release_storage(file.owner_id, file.size_bytes)
            .await
        {
            warn!(file_id = %file.id, error = %e, "Failed to release quota reservation");
        }
    }
}

/// Key layout: `users/{owner_id}/files/{file_id}-{name}`.
pub fn storage_key(owner_id: Uuid, file_id: Uuid, name: &str) -> String {
    format!("users/{owner_id}/files/{file_id}-{name}")
}

fn validate_file_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("File name cannot be empty"));
    }
    if name.len() > 255 {
        return Err(AppError::validation("File name is too long"));
    }
    if name.contains('/') || name.contains('\0') {
        return Err(AppError::validation("File name contains invalid characters"));
    }
    Ok(name.to_owned())
}

fn normalize_mime(mime_type: &str) -> String {
    let trimmed = mime_type.trim();
    if trimmed.is_empty() || !trimmed.contains('/') {
        "application/octet-stream".to_owned()
    } else {
        trimmed.to_ascii_lowercase()
    }
}

fn access_denied() -> AppError {
    AppError::forbidden("You do not have access to this file").with_code("ACCESS_DENIED")
}
