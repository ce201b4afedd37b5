//! Explicit share grant management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_database::repositories::{
    FileRepository, FolderRepository, ShareRepository, UserRepository,
};
use drive_entity::file::model::File;
use drive_entity::folder::model::Folder;
use drive_entity::resource::{ResourceType, ShareRole};
use drive_entity::share::model::{CreateShare, Share};

use crate::context::RequestContext;
use crate::share::access::{require_manage_rights, AccessResolver};

/// A grant joined with the grantee's identity, for listings.
#[derive(Debug, Clone)]
pub struct GrantDetails {
    pub share: Share,
    pub grantee_email: String,
    pub grantee_name: String,
}

/// A grant received by the current user, joined with its live target.
/// Targets that were trashed or purged since the grant are dropped.
#[derive(Debug, Clone)]
pub struct SharedWithMeItem {
    pub share: Share,
    pub file: Option<File>,
    pub folder: Option<Folder>,
}

/// Manages explicit user-to-user shares.
#[derive(Debug, Clone)]
pub struct ShareService {
    share_repo: Arc<ShareRepository>,
    user_repo: Arc<UserRepository>,
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    resolver: AccessResolver,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        user_repo: Arc<UserRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        resolver: AccessResolver,
    ) -> Self {
        Self {
            share_repo,
            user_repo,
            file_repo,
            folder_repo,
            resolver,
        }
    }

    /// Shares a resource with another user by email.
    ///
    /// Allowed for the owner, or for a grantee whose resolved role is
    /// editor. The grantee must exist and cannot be the acting user.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
        grantee_email: &str,
        role: ShareRole,
    ) -> AppResult<GrantDetails> {
        self.require_share_rights(ctx, resource_type, resource_id)
            .await?;

        let grantee = self
            .user_repo
            .find_by_email(&grantee_email.trim().to_lowercase())
            .await?
            .ok_or_else(|| {
                AppError::not_found("No account with that email").with_code("USER_NOT_FOUND")
            })?;

        if grantee.id == ctx.user_id {
            return Err(AppError::validation("Cannot share a resource with yourself"));
        }

        let share = self
            .share_repo
            .create(&CreateShare {
                resource_type,
                resource_id,
                grantee_user_id: grantee.id,
                role,
                created_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            share_id = %share.id,
            resource_type = %resource_type,
            resource_id = %resource_id,
            grantee = %grantee.id,
            role = %role,
            "Share created"
        );

        Ok(GrantDetails {
            share,
            grantee_email: grantee.email,
            grantee_name: grantee.name,
        })
    }

    /// Lists all grants on a resource, for the owner or an editor.
    pub async fn list_for_resource(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<Vec<GrantDetails>> {
        self.require_share_rights(ctx, resource_type, resource_id)
            .await?;

        let shares = self
            .share_repo
            .find_for_resource(resource_type, resource_id)
            .await?;

        let mut details = Vec::with_capacity(shares.len());
        for share in shares {
            if let Some(grantee) = self.user_repo.find_by_id(share.grantee_user_id).await? {
                details.push(GrantDetails {
                    share,
                    grantee_email: grantee.email,
                    grantee_name: grantee.name,
                });
            }
        }
        Ok(details)
    }

    /// Revokes a grant. Only the user who created it may revoke it.
    pub async fn revoke(&self, ctx: &RequestContext, share_id: Uuid) -> AppResult<()> {
        let share = self
            .share_repo
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.created_by != ctx.user_id {
            return Err(AppError::forbidden("Only the share's creator can revoke it"));
        }

        self.share_repo.delete(share_id).await?;
        info!(user_id = %ctx.user_id, share_id = %share_id, "Share revoked");
        Ok(())
    }

    /// Everything shared with the current user, joined with live targets.
    pub async fn shared_with_me(&self, ctx: &RequestContext) -> AppResult<Vec<SharedWithMeItem>> {
        let shares = self.share_repo.find_for_grantee(ctx.user_id).await?;

        let mut items = Vec::new();
        for share in shares {
            match share.resource_type {
                ResourceType::File => {
                    let file = self.file_repo.find_by_id(share.resource_id).await?;
                    if let Some(file) = file.filter(|f| !f.is_deleted) {
                        items.push(SharedWithMeItem {
                            share,
                            file: Some(file),
                            folder: None,
                        });
                    }
                }
                ResourceType::Folder => {
                    let folder = self.folder_repo.find_by_id(share.resource_id).await?;
                    if let Some(folder) = folder.filter(|f| !f.is_deleted) {
                        items.push(SharedWithMeItem {
                            share,
                            file: None,
                            folder: Some(folder),
                        });
                    }
                }
            }
        }
        Ok(items)
    }

    /// Owner or resolved-editor check for grant management.
    async fn require_share_rights(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<()> {
        require_manage_rights(
            ctx.user_id,
            resource_type,
            resource_id,
            &self.file_repo,
            &self.folder_repo,
            &self.resolver,
        )
        .await
    }
}
