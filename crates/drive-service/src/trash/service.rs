//! Trash listing, restore, and permanent purge.
//!
//! Soft-deleting a file frees its quota immediately; restoring it must
//! re-reserve that quota and fails if the account no longer has room.
//! Purging removes the storage object, the metadata row, and every
//! grant, link, star, and recent entry pointing at it.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::traits::ObjectStore;
use drive_database::repositories::{
    FileRepository, FolderRepository, LinkShareRepository, RecentRepository, ShareRepository,
    StarRepository, UserRepository,
};
use drive_entity::file::model::File;
use drive_entity::folder::model::Folder;
use drive_entity::resource::ResourceType;

use crate::context::RequestContext;

/// Trashed files and folders for one user.
#[derive(Debug, Clone)]
pub struct TrashContents {
    pub files: Vec<File>,
    pub folders: Vec<Folder>,
}

/// Outcome of a scheduled purge pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct PurgeStats {
    pub files_purged: u64,
    pub folders_purged: u64,
}

/// Manages the trash lifecycle.
#[derive(Debug, Clone)]
pub struct TrashService {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    user_repo: Arc<UserRepository>,
    share_repo: Arc<ShareRepository>,
    link_repo: Arc<LinkShareRepository>,
    star_repo: Arc<StarRepository>,
    recent_repo: Arc<RecentRepository>,
    store: Arc<dyn ObjectStore>,
}

impl TrashService {
    /// Creates a new trash service.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        user_repo: Arc<UserRepository>,
        share_repo: Arc<ShareRepository>,
        link_repo: Arc<LinkShareRepository>,
        star_repo: Arc<StarRepository>,
        recent_repo: Arc<RecentRepository>,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            file_repo,
            folder_repo,
            user_repo,
            share_repo,
            link_repo,
            star_repo,
            recent_repo,
            store,
        }
    }

    /// The user's trashed items, most recently trashed first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<TrashContents> {
        let (files, folders) = tokio::join!(
            self.file_repo.list_trashed(ctx.user_id),
            self.folder_repo.list_trashed(ctx.user_id),
        );
        Ok(TrashContents {
            files: files?,
            folders: folders?,
        })
    }

    /// Restores a trashed item. Only the owner can restore, and restoring
    /// a file re-reserves its quota.
    pub async fn restore(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<()> {
        match resource_type {
            ResourceType::File => {
                let file = self.require_trashed_file(ctx, resource_id).await?;
                self.user_repo
                    .reserve_storage(file.owner_id, file.size_bytes)
                    .await?
                    .ok_or_else(|| {
                        AppError::forbidden("Not enough storage space left to restore this file")
                            .with_code("STORAGE_LIMIT_EXCEEDED")
                    })?;
                self.file_repo.set_deleted(resource_id, false).await?;
            }
            ResourceType::Folder => {
                self.require_trashed_folder(ctx, resource_id).await?;
                self.folder_repo.set_deleted(resource_id, false).await?;
            }
        }
        info!(
            user_id = %ctx.user_id,
            resource_type = %resource_type,
            resource_id = %resource_id,
            "Item restored from trash"
        );
        Ok(())
    }

    /// Permanently deletes one trashed item.
    pub async fn delete_item(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<()> {
        match resource_type {
            ResourceType::File => {
                let file = self.require_trashed_file(ctx, resource_id).await?;
                self.purge_file(&file, true).await?;
            }
            ResourceType::Folder => {
                let folder = self.require_trashed_folder(ctx, resource_id).await?;
                self.purge_folder(&folder).await?;
            }
        }
        info!(
            user_id = %ctx.user_id,
            resource_type = %resource_type,
            resource_id = %resource_id,
            "Item permanently deleted"
        );
        Ok(())
    }

    /// Permanently deletes everything in the user's trash.
    pub async fn empty(&self, ctx: &RequestContext) -> AppResult<()> {
        let contents = self.list(ctx).await?;
        for file in &contents.files {
            self.purge_file(file, true).await?;
        }
        for folder in &contents.folders {
            self.purge_folder(folder).await?;
        }
        info!(user_id = %ctx.user_id, "Trash emptied");
        Ok(())
    }

    /// Purges all items trashed longer ago than `retention_days`.
    /// Called by the scheduled sweep; errors on individual items are
    /// logged and skipped so one bad row cannot stall the whole pass.
    pub async fn purge_expired(&self, retention_days: u32) -> AppResult<PurgeStats> {
        let cutoff = Utc::now() - Duration::days(i64::from(retention_days));
        let mut stats = PurgeStats::default();

        for file in self.file_repo.find_deleted_before(cutoff).await? {
            match self.purge_file(&file, true).await {
                Ok(()) => stats.files_purged += 1,
                Err(e) => warn!(file_id = %file.id, error = %e, "Failed to purge file"),
            }
        }
        for folder in self.folder_repo.find_deleted_before(cutoff).await? {
            match self.purge_folder(&folder).await {
                Ok(()) => stats.folders_purged += 1,
                Err(e) => warn!(folder_id = %folder.id, error = %e, "Failed to purge folder"),
            }
        }
        Ok(stats)
    }

    /// Removes a file's object, row, and references.
    ///
    /// `already_released` is true when the file was individually trashed
    /// (its quota came back at soft-delete time). Files swept along with
    /// a purged folder never released theirs, so it is returned here.
    async fn purge_file(&self, file: &File, already_released: bool) -> AppResult<()> {
        self.store.delete(&file.storage_key).await?;
        if !already_released {
            self.user_repo
                .release_storage(file.owner_id, file.size_bytes)
                .await?;
        }
        self.cleanup_references(ResourceType::File, file.id).await?;
        self.file_repo.delete_hard(file.id).await?;
        Ok(())
    }

    /// Removes a folder subtree: every contained file's object and
    /// references, then the folder row (children cascade).
    async fn purge_folder(&self, folder: &Folder) -> AppResult<()> {
        let files = self.file_repo.find_in_folder_tree(folder.id).await?;
        for file in &files {
            self.store.delete(&file.storage_key).await?;
            // Files individually trashed inside the subtree already gave
            // their quota back.
            if !file.is_deleted {
                self.user_repo
                    .release_storage(file.owner_id, file.size_bytes)
                    .await?;
            }
            self.cleanup_references(ResourceType::File, file.id).await?;
        }
        self.cleanup_references(ResourceType::Folder, folder.id).await?;
        self.folder_repo.delete_hard(folder.id).await?;
        Ok(())
    }

    async fn cleanup_references(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<()> {
        self.share_repo
            .delete_for_resource(resource_type, resource_id)
            .await?;
        self.link_repo
            .delete_for_resource(resource_type, resource_id)
            .await?;
        self.star_repo
            .delete_for_resource(resource_type, resource_id)
            .await?;
        self.recent_repo
            .delete_for_resource(resource_type, resource_id)
            .await?;
        Ok(())
    }

    async fn require_trashed_file(&self, ctx: &RequestContext, id: Uuid) -> AppResult<File> {
        self.file_repo
            .find_by_id(id)
            .await?
            .filter(|f| f.is_deleted && f.owner_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("File not found in trash"))
    }

    async fn require_trashed_folder(&self, ctx: &RequestContext, id: Uuid) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(id)
            .await?
            .filter(|f| f.is_deleted && f.owner_id == ctx.user_id)
            .ok_or_else(|| AppError::not_found("Folder not found in trash"))
    }
}
