//! Public link shares: opaque bearer tokens with optional password and
//! expiry.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use rand::Rng as _;
use tracing::info;
use uuid::Uuid;

use drive_auth::password::PasswordHasher;
use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_core::traits::{ObjectStore, SignedUrl};
use drive_database::repositories::{FileRepository, FolderRepository, LinkShareRepository};
use drive_entity::file::model::File;
use drive_entity::folder::model::Folder;
use drive_entity::resource::ResourceType;
use drive_entity::share::link::{CreateLinkShare, LinkShare};

use crate::context::RequestContext;
use crate::share::access::{require_manage_rights, AccessResolver};

/// Bytes of entropy in a link token (256 bits before encoding).
const TOKEN_BYTES: usize = 32;

/// Generate an unguessable URL-safe link token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// A resolved link joined with its live target.
#[derive(Debug, Clone)]
pub struct ResolvedLink {
    pub link: LinkShare,
    pub file: Option<File>,
    pub folder: Option<Folder>,
}

/// Manages public link shares.
#[derive(Debug, Clone)]
pub struct LinkShareService {
    link_repo: Arc<LinkShareRepository>,
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
    resolver: AccessResolver,
    store: Arc<dyn ObjectStore>,
    hasher: PasswordHasher,
    download_url_ttl: Duration,
}

impl LinkShareService {
    /// Creates a new link share service.
    pub fn new(
        link_repo: Arc<LinkShareRepository>,
        file_repo: Arc<FileRepository>,
        folder_repo: Arc<FolderRepository>,
        resolver: AccessResolver,
        store: Arc<dyn ObjectStore>,
        download_url_ttl: Duration,
    ) -> Self {
        Self {
            link_repo,
            file_repo,
            folder_repo,
            resolver,
            store,
            hasher: PasswordHasher::new(),
            download_url_ttl,
        }
    }

    /// Creates a public link on a resource, for the owner or an editor.
    /// An expiry in the past is rejected outright.
    pub async fn create_link(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
        password: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> AppResult<LinkShare> {
        require_manage_rights(
            ctx.user_id,
            resource_type,
            resource_id,
            &self.file_repo,
            &self.folder_repo,
            &self.resolver,
        )
        .await?;

        if expires_at.is_some_and(|exp| exp <= Utc::now()) {
            return Err(AppError::validation("Expiry must be in the future"));
        }

        let password_hash = match password.filter(|p| !p.is_empty()) {
            Some(p) => Some(self.hasher.hash(p)?),
            None => None,
        };

        let link = self
            .link_repo
            .create(&CreateLinkShare {
                token: generate_token(),
                resource_type,
                resource_id,
                password_hash,
                expires_at,
                created_by: ctx.user_id,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            link_id = %link.id,
            resource_type = %resource_type,
            resource_id = %resource_id,
            protected = link.requires_password(),
            "Link share created"
        );

        Ok(link)
    }

    /// Lists the links on a resource, for the owner or an editor.
    pub async fn list_for_resource(
        &self,
        ctx: &RequestContext,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<Vec<LinkShare>> {
        require_manage_rights(
            ctx.user_id,
            resource_type,
            resource_id,
            &self.file_repo,
            &self.folder_repo,
            &self.resolver,
        )
        .await?;

        self.link_repo
            .find_for_resource(resource_type, resource_id)
            .await
    }

    /// Lists every link the user has created.
    pub async fn list_mine(&self, ctx: &RequestContext) -> AppResult<Vec<LinkShare>> {
        self.link_repo.find_by_creator(ctx.user_id).await
    }

    /// Revokes a link. Only the user who created it may revoke it.
    pub async fn revoke(&self, ctx: &RequestContext, link_id: Uuid) -> AppResult<()> {
        let link = self
            .link_repo
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link share not found"))?;

        if link.created_by != ctx.user_id {
            return Err(AppError::forbidden("Only the link's creator can revoke it"));
        }

        self.link_repo.delete(link_id).await?;
        info!(user_id = %ctx.user_id, link_id = %link_id, "Link share revoked");
        Ok(())
    }

    /// Resolves a public token into its target.
    ///
    /// Checks run in a fixed order so the wire code tells the anonymous
    /// caller exactly what to do next: unknown token is 404, an expired
    /// link is 410 `EXPIRED`, a protected link without the right password
    /// is 403 `PASSWORD_REQUIRED` / `INVALID_PASSWORD`, and a target that
    /// has since been trashed or purged is 404.
    pub async fn resolve(&self, token: &str, password: Option<&str>) -> AppResult<ResolvedLink> {
        let link = self
            .link_repo
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found"))?;

        if link.is_expired(Utc::now()) {
            return Err(AppError::gone("This link has expired").with_code("EXPIRED"));
        }

        if let Some(hash) = &link.password_hash {
            let Some(password) = password.filter(|p| !p.is_empty()) else {
                return Err(AppError::forbidden("This link requires a password")
                    .with_code("PASSWORD_REQUIRED"));
            };
            if !self.hasher.verify(password, hash)? {
                return Err(
                    AppError::forbidden("Incorrect link password").with_code("INVALID_PASSWORD")
                );
            }
        }

        match link.resource_type {
            ResourceType::File => {
                let file = self
                    .file_repo
                    .find_by_id(link.resource_id)
                    .await?
                    .filter(|f| !f.is_deleted)
                    .ok_or_else(|| AppError::not_found("The shared file no longer exists"))?;
                Ok(ResolvedLink {
                    link,
                    file: Some(file),
                    folder: None,
                })
            }
            ResourceType::Folder => {
                let folder = self
                    .folder_repo
                    .find_by_id(link.resource_id)
                    .await?
                    .filter(|f| !f.is_deleted)
                    .ok_or_else(|| AppError::not_found("The shared folder no longer exists"))?;
                Ok(ResolvedLink {
                    link,
                    file: None,
                    folder: Some(folder),
                })
            }
        }
    }

    /// Resolves a file link and mints a download URL for it.
    pub async fn resolve_download(
        &self,
        token: &str,
        password: Option<&str>,
    ) -> AppResult<(File, SignedUrl)> {
        let resolved = self.resolve(token, password).await?;
        let file = resolved
            .file
            .ok_or_else(|| AppError::validation("This link points at a folder, not a file"))?;

        let url = self
            .store
            .signed_download_url(&file.storage_key, &file.name, self.download_url_ttl)
            .await?;
        Ok((file, url))
    }
}
