//! Folder CRUD with ownership and share-role enforcement.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_database::repositories::{FileRepository, FolderRepository};
use drive_entity::file::model::File;
use drive_entity::folder::model::{CreateFolder, Folder};
use drive_entity::resource::ShareRole;

use crate::context::RequestContext;
use crate::share::access::{AccessResolver, MAX_ANCESTOR_DEPTH};

/// A folder together with its immediate contents.
#[derive(Debug, Clone)]
pub struct FolderContents {
    pub folder: Option<Folder>,
    pub folders: Vec<Folder>,
    pub files: Vec<File>,
}

/// Manages folder CRUD operations.
#[derive(Debug, Clone)]
pub struct FolderService {
    folder_repo: Arc<FolderRepository>,
    file_repo: Arc<FileRepository>,
    resolver: AccessResolver,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folder_repo: Arc<FolderRepository>,
        file_repo: Arc<FileRepository>,
        resolver: AccessResolver,
    ) -> Self {
        Self {
            folder_repo,
            file_repo,
            resolver,
        }
    }

    /// Creates a folder, at the root or under a parent the user can edit.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        name: &str,
        parent_id: Option<Uuid>,
    ) -> AppResult<Folder> {
        let name = validate_name(name)?;

        if let Some(parent_id) = parent_id {
            let parent = self.require_folder(parent_id).await?;
            self.require_edit(ctx, &parent).await?;
        }

        let folder = self
            .folder_repo
            .create(&CreateFolder {
                name,
                owner_id: ctx.user_id,
                parent_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, folder_id = %folder.id, "Folder created");
        Ok(folder)
    }

    /// The user's root-level folders and files.
    pub async fn list_root_contents(&self, ctx: &RequestContext) -> AppResult<FolderContents> {
        let (folders, files) = tokio::join!(
            self.folder_repo.list_children(ctx.user_id, None),
            self.file_repo.list_by_folder(ctx.user_id, None),
        );
        Ok(FolderContents {
            folder: None,
            folders: folders?,
            files: files?,
        })
    }

    /// A folder and its immediate contents, for the owner or anyone with
    /// a resolved share role.
    pub async fn get_contents(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<FolderContents> {
        let folder = self.require_folder(folder_id).await?;
        self.require_view(ctx, &folder).await?;

        // Contents of a shared folder may span owners, so listing is by
        // parent alone once access is established.
        let (folders, files) = tokio::join!(
            self.folder_repo.list_children_any_owner(folder_id),
            self.file_repo.list_by_folder_any_owner(folder_id),
        );
        Ok(FolderContents {
            folder: Some(folder),
            folders: folders?,
            files: files?,
        })
    }

    /// Renames and/or moves a folder.
    ///
    /// `new_parent` uses double-Option patch semantics: `None` leaves the
    /// parent alone, `Some(None)` moves to the root, `Some(Some(id))`
    /// moves under `id`. A move that would put a folder inside itself or
    /// one of its descendants is rejected.
    pub async fn update_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: Option<&str>,
        new_parent: Option<Option<Uuid>>,
    ) -> AppResult<Folder> {
        let folder = self.require_folder(folder_id).await?;
        self.require_edit(ctx, &folder).await?;

        let mut updated = folder.clone();

        if let Some(target_parent) = new_parent {
            if let Some(parent_id) = target_parent {
                let parent = self.require_folder(parent_id).await?;
                self.require_edit(ctx, &parent).await?;
                self.reject_cyclic_move(folder_id, parent_id).await?;
            }
            updated = self.folder_repo.reparent(folder_id, target_parent).await?;
            info!(
                user_id = %ctx.user_id,
                folder_id = %folder_id,
                new_parent = ?target_parent,
                "Folder moved"
            );
        }

        if let Some(name) = new_name {
            let name = validate_name(name)?;
            updated = self.folder_repo.rename(folder_id, &name).await?;
            info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder renamed");
        }

        Ok(updated)
    }

    /// Moves a folder to the trash.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let folder = self.require_folder(folder_id).await?;
        self.require_edit(ctx, &folder).await?;

        let folder = self.folder_repo.set_deleted(folder_id, true).await?;
        info!(user_id = %ctx.user_id, folder_id = %folder_id, "Folder trashed");
        Ok(folder)
    }

    /// Loads a live (non-trashed) folder or fails with 404.
    async fn require_folder(&self, folder_id: Uuid) -> AppResult<Folder> {
        self.folder_repo
            .find_by_id(folder_id)
            .await?
            .filter(|f| !f.is_deleted)
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn require_view(&self, ctx: &RequestContext, folder: &Folder) -> AppResult<()> {
        if folder.owner_id == ctx.user_id {
            return Ok(());
        }
        if self
            .resolver
            .resolve_folder_access(ctx.user_id, folder)
            .await?
            .is_some()
        {
            return Ok(());
        }
        Err(access_denied())
    }

    async fn require_edit(&self, ctx: &RequestContext, folder: &Folder) -> AppResult<()> {
        if folder.owner_id == ctx.user_id {
            return Ok(());
        }
        if self
            .resolver
            .resolve_folder_access(ctx.user_id, folder)
            .await?
            == Some(ShareRole::Editor)
        {
            return Ok(());
        }
        Err(access_denied())
    }

    /// Rejects a reparent that would create a cycle: the destination must
    /// not be the folder itself or anywhere in its subtree. Walks from the
    /// destination toward the root looking for the moved folder.
    async fn reject_cyclic_move(&self, folder_id: Uuid, destination: Uuid) -> AppResult<()> {
        if folder_id == destination {
            return Err(AppError::validation("Cannot move a folder into itself"));
        }

        let mut visited: HashSet<Uuid> = HashSet::new();
        let mut current = Some(destination);
        while let Some(id) = current {
            if id == folder_id {
                return Err(AppError::validation(
                    "Cannot move a folder into one of its descendants",
                ));
            }
            if !visited.insert(id) || visited.len() > MAX_ANCESTOR_DEPTH {
                return Err(AppError::internal(
                    "Folder hierarchy contains a cycle or exceeds the depth bound",
                ));
            }
            current = match self.folder_repo.find_by_id(id).await? {
                Some(folder) => folder.parent_id,
                None => None,
            };
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Folder name cannot be empty"));
    }
    if name.len() > 255 {
        return Err(AppError::validation("Folder name is too long"));
    }
    if name.contains('/') || name.contains('\0') {
        return Err(AppError::validation("Folder name contains invalid characters"));
    }
    Ok(name.to_owned())
}

fn access_denied() -> AppError {
    AppError::forbidden("You do not have access to this folder").with_code("ACCESS_DENIED")
}
