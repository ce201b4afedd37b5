//! Starring and unstarring files and folders.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_database::repositories::{FileRepository, FolderRepository, StarRepository};
use drive_entity::file::model::File;
use drive_entity::folder::model::Folder;
use drive_entity::resource::ResourceType;
use drive_entity::star::model::Star;

use crate::context::RequestContext;
use crate::share::access::AccessResolver;

/// A star joined with its live target. Targets that were trashed or
/// purged since starring are dropped from listings.
#[derive(Debug, Clone)]
pub struct StarredItem {
    pub star: Star,
    pub file: Option<File>,
    pub folder: Option<Folder>,
}

/// Manages per-user stars.
#[derive(Debug, Clone)]
pub struct StarService {
    star_repo: Arc<StarRepository>,
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    resolver: AccessResolver,
}

impl StarService {
    /// Creates a new star service.
    pub fn new(
        star_repo: Arc<StarRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        resolver: AccessResolver,
    ) -> Self {
        Self {
            star_repo,
            file_repo,
            folder_repo,
            resolver,
        }
    }

    /// Stars a resource the user can at least view.
    pub async fn star(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<Star> {
        self.require_view(ctx, resource_type, resource_id).await?;

        let star = self
            .star_repo
            .create(ctx.user_id, resource_type, resource_id)
            .await?;
        info!(
            user_id = %ctx.user_id,
            resource_type = %resource_type,
            resource_id = %resource_id,
            "Resource starred"
        );
        Ok(star)
    }

    /// Removes a star.
    pub async fn unstar(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<()> {
        let removed = self
            .star_repo
            .delete(ctx.user_id, resource_type, resource_id)
            .await?;
        if !removed {
            return Err(AppError::not_found("Star not found"));
        }
        Ok(())
    }

    /// The user's starred items, joined with live targets.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<StarredItem>> {
        let stars = self.star_repo.find_for_user(ctx.user_id).await?;

        let mut items = Vec::new();
        for star in stars {
            match star.resource_type {
                ResourceType::File => {
                    let file = self.file_repo.find_by_id(star.resource_id).await?;
                    if let Some(file) = file.filter(|f| !f.is_deleted) {
                        items.push(StarredItem {
                            star,
                            file: Some(file),
                            folder: None,
                        });
                    }
                }
                ResourceType::Folder => {
                    let folder = self.folder_repo.find_by_id(star.resource_id).await?;
                    if let Some(folder) = folder.filter(|f| !f.is_deleted) {
                        items.push(StarredItem {
                            star,
                            file: None,
                            folder: Some(folder),
                        });
                    }
                }
            }
        }
        Ok(items)
    }

    async fn require_view(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<()> {
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
        if allowed {
            Ok(())
        } else {
            Err(AppError::forbidden("You do not have access to this resource")
                .with_code("ACCESS_DENIED"))
        }
    }
}
