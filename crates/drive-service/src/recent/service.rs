//! Last-opened tracking.

use std::sync::Arc;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_database::repositories::{FileRepository, FolderRepository, RecentRepository};
use drive_entity::file::model::File;
use drive_entity::folder::model::Folder;
use drive_entity::recent::model::RecentItem;
use drive_entity::resource::ResourceType;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::share::access::AccessResolver;

/// Default number of entries in a recent listing.
pub const DEFAULT_RECENT_LIMIT: i64 = 50;

/// A recent entry joined with its live target.
#[derive(Debug, Clone)]
pub struct RecentEntry {
    pub item: RecentItem,
    pub file: Option<File>,
    pub folder: Option<Folder>,
}

/// Tracks and lists recently opened resources.
#[derive(Debug, Clone)]
pub struct RecentService {
    recent_repo: Arc<RecentRepository>,
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    resolver: AccessResolver,
}

impl RecentService {
    /// Creates a new recent-items service.
    pub fn new(
        recent_repo: Arc<RecentRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        resolver: AccessResolver,
    ) -> Self {
        Self {
            recent_repo,
            file_repo,
            folder_repo,
            resolver,
        }
    }

    /// Records that the user opened a resource they can view.
    pub async fn touch(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<RecentItem> {
        let allowed = match resource_type {
            ResourceType::File => {
                let file = self
                    .file_repo
                    .find_by_id(resource_id)
                    .await?
                    .filter(|f| !f.is_deleted)
                    .ok_or_else(|| AppError::not_found("File not found"))?;
                file.owner_id == ctx.user_id
                    || self
                        .resolver
                        .resolve_file_access(ctx.user_id, &file)
                        .await?
                        .is_some()
            }
            ResourceType::Folder => {
                let folder = self
                    .folder_repo
                    .find_by_id(resource_id)
                    .await?
                    .filter(|f| !f.is_deleted)
                    .ok_or_else(|| AppError::not_found("Folder not found"))?;
                folder.owner_id == ctx.user_id
                    || self
                        .resolver
                        .resolve_folder_access(ctx.user_id, &folder)
                        .await?
                        .is_some()
            }
        };
        if !allowed {
            return Err(AppError::forbidden("You do not have access to this resource")
                .with_code("ACCESS_DENIED"));
        }
        self.recent_repo
            .touch(ctx.user_id, resource_type, resource_id)
            .await
    }

    /// The user's most recently opened items, joined with live targets.
    pub async fn list(&self, ctx: &RequestContext, limit: Option<i64>) -> AppResult<Vec<RecentEntry>> {
        let limit = limit.unwrap_or(DEFAULT_RECENT_LIMIT).clamp(1, 200);
        let rows = self.recent_repo.find_for_user(ctx.user_id, limit).await?;

        let mut entries = Vec::new();
        for item in rows {
            match item.resource_type {
                ResourceType::File => {
                    let file = self.file_repo.find_by_id(item.resource_id).await?;
                    if let Some(file) = file.filter(|f| !f.is_deleted) {
                        entries.push(RecentEntry {
                            item,
                            file: Some(file),
                            folder: None,
                        });
                    }
                }
                ResourceType::Folder => {
                    let folder = self.folder_repo.find_by_id(item.resource_id).await?;
                    if let Some(folder) = folder.filter(|f| !f.is_deleted) {
                        entries.push(RecentEntry {
                            item,
                            file: None,
                            folder: Some(folder),
                        });
                    }
                }
            }
        }
        Ok(entries)
    }
}
