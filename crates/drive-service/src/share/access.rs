//! Share access resolution via the folder ancestor chain.
//!
//! A grant on a folder covers everything beneath it. Resolution checks
//! the resource itself first, then walks parent folders toward the root
//! until a grant for the user turns up. The walk is bounded and tracks
//! visited nodes, so a corrupted hierarchy (reparent race producing a
//! cycle) fails loudly instead of hanging the request.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_database::repositories::{FileRepository, FolderRepository, ShareRepository};
use drive_entity::file::model::File;
use drive_entity::folder::model::Folder;
use drive_entity::resource::{ResourceType, ShareRole};

/// Hard bound on ancestor-walk depth.
pub const MAX_ANCESTOR_DEPTH: usize = 64;

/// Looks up the share role a user holds directly on a resource.
#[async_trait]
pub trait ShareLookup: Send + Sync {
    async fn grant_role(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
        grantee_user_id: Uuid,
    ) -> AppResult<Option<ShareRole>>;
}

/// Parent pointer and trash state of a folder, as needed by the walk.
#[derive(Debug, Clone, Copy)]
pub struct FolderLink {
    pub parent_id: Option<Uuid>,
    pub is_deleted: bool,
}

/// Looks up a folder's position in the hierarchy.
#[async_trait]
pub trait ParentLookup: Send + Sync {
    /// Returns `None` when the folder does not exist.
    async fn folder_link(&self, folder_id: Uuid) -> AppResult<Option<FolderLink>>;
}

#[async_trait]
impl ShareLookup for ShareRepository {
    async fn grant_role(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
        grantee_user_id: Uuid,
    ) -> AppResult<Option<ShareRole>> {
        Ok(self
            .find_grant(resource_type, resource_id, grantee_user_id)
            .await?
            .map(|share| share.role))
    }
}

#[async_trait]
impl ParentLookup for FolderRepository {
    async fn folder_link(&self, folder_id: Uuid) -> AppResult<Option<FolderLink>> {
        Ok(self.find_by_id(folder_id).await?.map(|folder| FolderLink {
            parent_id: folder.parent_id,
            is_deleted: folder.is_deleted,
        }))
    }
}

/// Resolves the effective share role a user holds on a resource.
///
/// Ownership is not modeled here; callers check `owner_id` first and only
/// consult the resolver for non-owners.
#[derive(Clone)]
pub struct AccessResolver {
    shares: Arc<dyn ShareLookup>,
    parents: Arc<dyn ParentLookup>,
}

impl std::fmt::Debug for AccessResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessResolver").finish_non_exhaustive()
    }
}

impl AccessResolver {
    /// Creates a new access resolver.
    pub fn new(shares: Arc<dyn ShareLookup>, parents: Arc<dyn ParentLookup>) -> Self {
        Self { shares, parents }
    }

    /// The role `user_id` holds on a file, via a direct grant or any
    /// ancestor folder grant.
    pub async fn resolve_file_access(
        &self,
        user_id: Uuid,
        file: &File,
    ) -> AppResult<Option<ShareRole>> {
        if let Some(role) = self
            .shares
            .grant_role(ResourceType::File, file.id, user_id)
            .await?
        {
            return Ok(Some(role));
        }
        self.walk_ancestors(user_id, file.folder_id).await
    }

    /// The role `user_id` holds on a folder, via a direct grant or any
    /// ancestor folder grant.
    pub async fn resolve_folder_access(
        &self,
        user_id: Uuid,
        folder: &Folder,
    ) -> AppResult<Option<ShareRole>> {
        if let Some(role) = self
            .shares
            .grant_role(ResourceType::Folder, folder.id, user_id)
            .await?
        {
            return Ok(Some(role));
        }
        self.walk_ancestors(user_id, folder.parent_id).await
    }

    async fn walk_ancestors(
        &self,
        user_id: Uuid,
        start: Option<Uuid>,
    ) -> AppResult<Option<ShareRole>> {
        let mut visited: HashSet<Uuid> = HashSet::new();
        let mut current = start;

        while let Some(folder_id) = current {
            if !visited.insert(folder_id) || visited.len() > MAX_ANCESTOR_DEPTH {
                return Err(AppError::internal(
                    "Folder hierarchy contains a cycle or exceeds the depth bound",
                ));
            }

            let Some(link) = self.parents.folder_link(folder_id).await? else {
                break;
            };
            // A trashed ancestor severs shared access to its subtree.
            if link.is_deleted {
                break;
            }
            if let Some(role) = self
                .shares
                .grant_role(ResourceType::Folder, folder_id, user_id)
                .await?
            {
                return Ok(Some(role));
            }
            current = link.parent_id;
        }
        Ok(None)
    }
}

/// Owner-or-editor check shared by grant and link-share management.
///
/// The target must exist and be out of the trash. Non-owners need a
/// resolved editor role; anything less is `ACCESS_DENIED`.
pub async fn require_manage_rights(
    user_id: Uuid,
    resource_type: ResourceType,
    resource_id: Uuid,
    file_repo: &FileRepository,
    folder_repo: &FolderRepository,
    resolver: &AccessResolver,
) -> AppResult<()> {
    let allowed = match resource_type {
        ResourceType::File => {
            let file = file_repo
                .find_by_id(resource_id)
                .await?
                .filter(|f| !f.is_deleted)
                .ok_or_else(|| AppError::not_found("File not found"))?;
            file.owner_id == user_id
                || resolver
                    .resolve_file_access(user_id, &file)
                    .await?
                    .is_some_and(|r| r.can_edit())
        }
        ResourceType::Folder => {
            let folder = folder_repo
                .find_by_id(resource_id)
                .await?
                .filter(|f| !f.is_deleted)
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            folder.owner_id == user_id
                || resolver
                    .resolve_folder_access(user_id, &folder)
                    .await?
                    .is_some_and(|r| r.can_edit())
        }
    };
    if allowed {
        Ok(())
    } else {
        Err(AppError::forbidden("You cannot manage shares on this resource")
            .with_code("ACCESS_DENIED"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemShares {
        grants: Mutex<HashMap<(ResourceType, Uuid, Uuid), ShareRole>>,
    }

    impl MemShares {
        fn grant(&self, rt: ResourceType, resource: Uuid, user: Uuid, role: ShareRole) {
            self.grants.lock().unwrap().insert((rt, resource, user), role);
        }
    }

    #[async_trait]
    impl ShareLookup for MemShares {
        async fn grant_role(
            &self,
            rt: ResourceType,
            resource_id: Uuid,
            grantee: Uuid,
        ) -> AppResult<Option<ShareRole>> {
            Ok(self.grants.lock().unwrap().get(&(rt, resource_id, grantee)).copied())
        }
    }

    #[derive(Default)]
    struct MemFolders {
        links: Mutex<HashMap<Uuid, FolderLink>>,
    }

    impl MemFolders {
        fn add(&self, id: Uuid, parent_id: Option<Uuid>) {
            self.links.lock().unwrap().insert(
                id,
                FolderLink {
                    parent_id,
                    is_deleted: false,
                },
            );
        }

        fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) {
            self.links.lock().unwrap().get_mut(&id).unwrap().parent_id = parent_id;
        }

        fn trash(&self, id: Uuid) {
            self.links.lock().unwrap().get_mut(&id).unwrap().is_deleted = true;
        }
    }

    #[async_trait]
    impl ParentLookup for MemFolders {
        async fn folder_link(&self, folder_id: Uuid) -> AppResult<Option<FolderLink>> {
            Ok(self.links.lock().unwrap().get(&folder_id).copied())
        }
    }

    fn file_in(owner: Uuid, folder_id: Option<Uuid>) -> File {
        File {
            id: Uuid::new_v4(),
            name: "notes.txt".into(),
            mime_type: "text/plain".into(),
            size_bytes: 10,
            storage_key: "k".into(),
            owner_id: owner,
            folder_id,
            is_deleted: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn resolver(shares: Arc<MemShares>, folders: Arc<MemFolders>) -> AccessResolver {
        AccessResolver::new(shares, folders)
    }

    #[tokio::test]
    async fn direct_file_grant_wins() {
        let shares = Arc::new(MemShares::default());
        let folders = Arc::new(MemFolders::default());
        let owner = Uuid::new_v4();
        let grantee = Uuid::new_v4();
        let file = file_in(owner, None);
        shares.grant(ResourceType::File, file.id, grantee, ShareRole::Editor);

        let r = resolver(shares, folders);
        let role = r.resolve_file_access(grantee, &file).await.unwrap();
        assert_eq!(role, Some(ShareRole::Editor));
    }

    #[tokio::test]
    async fn ancestor_grant_covers_nested_file() {
        let shares = Arc::new(MemShares::default());
        let folders = Arc::new(MemFolders::default());
        let owner = Uuid::new_v4();
        let grantee = Uuid::new_v4();

        // root <- mid <- leaf, file lives in leaf, grant is on root.
        let root = Uuid::new_v4();
        let mid = Uuid::new_v4();
        let leaf = Uuid::new_v4();
        folders.add(root, None);
        folders.add(mid, Some(root));
        folders.add(leaf, Some(mid));
        shares.grant(ResourceType::Folder, root, grantee, ShareRole::Viewer);

        let file = file_in(owner, Some(leaf));
        let r = resolver(shares, folders);
        let role = r.resolve_file_access(grantee, &file).await.unwrap();
        assert_eq!(role, Some(ShareRole::Viewer));
    }

    #[tokio::test]
    async fn sibling_grant_confers_nothing() {
        let shares = Arc::new(MemShares::default());
        let folders = Arc::new(MemFolders::default());
        let owner = Uuid::new_v4();
        let grantee = Uuid::new_v4();

        let root = Uuid::new_v4();
        let shared_branch = Uuid::new_v4();
        let private_branch = Uuid::new_v4();
        folders.add(root, None);
        folders.add(shared_branch, Some(root));
        folders.add(private_branch, Some(root));
        shares.grant(ResourceType::Folder, shared_branch, grantee, ShareRole::Editor);

        let file = file_in(owner, Some(private_branch));
        let r = resolver(shares, folders);
        let role = r.resolve_file_access(grantee, &file).await.unwrap();
        assert_eq!(role, None);
    }

    #[tokio::test]
    async fn other_users_grant_confers_nothing() {
        let shares = Arc::new(MemShares::default());
        let folders = Arc::new(MemFolders::default());
        let owner = Uuid::new_v4();
        let grantee = Uuid::new_v4();
        let stranger = Uuid::new_v4();

        let root = Uuid::new_v4();
        folders.add(root, None);
        shares.grant(ResourceType::Folder, root, grantee, ShareRole::Editor);

        let file = file_in(owner, Some(root));
        let r = resolver(shares, folders);
        let role = r.resolve_file_access(stranger, &file).await.unwrap();
        assert_eq!(role, None);
    }

    #[tokio::test]
    async fn trashed_ancestor_severs_access() {
        let shares = Arc::new(MemShares::default());
        let folders = Arc::new(MemFolders::default());
        let owner = Uuid::new_v4();
        let grantee = Uuid::new_v4();

        let root = Uuid::new_v4();
        let mid = Uuid::new_v4();
        folders.add(root, None);
        folders.add(mid, Some(root));
        folders.trash(mid);
        shares.grant(ResourceType::Folder, root, grantee, ShareRole::Viewer);

        let file = file_in(owner, Some(mid));
        let r = resolver(shares, folders);
        let role = r.resolve_file_access(grantee, &file).await.unwrap();
        assert_eq!(role, None);
    }

    #[tokio::test]
    async fn cycle_fails_instead_of_hanging() {
        let shares = Arc::new(MemShares::default());
        let folders = Arc::new(MemFolders::default());
        let owner = Uuid::new_v4();
        let grantee = Uuid::new_v4();

        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        folders.add(a, Some(b));
        folders.add(b, None);
        folders.set_parent(b, Some(a));

        let file = file_in(owner, Some(a));
        let r = resolver(shares, folders);
        let err = r.resolve_file_access(grantee, &file).await.unwrap_err();
        assert_eq!(err.wire_code(), "INTERNAL_SERVER_ERROR");
    }

    #[tokio::test]
    async fn folder_resolution_checks_self_then_ancestors() {
        let shares = Arc::new(MemShares::default());
        let folders = Arc::new(MemFolders::default());
        let owner = Uuid::new_v4();
        let grantee = Uuid::new_v4();

        let root = Uuid::new_v4();
        let child = Uuid::new_v4();
        folders.add(root, None);
        folders.add(child, Some(root));
        shares.grant(ResourceType::Folder, root, grantee, ShareRole::Editor);

        let folder = Folder {
            id: child,
            name: "child".into(),
            owner_id: owner,
            parent_id: Some(root),
            is_deleted: false,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let r = resolver(shares, folders);
        let role = r.resolve_folder_access(grantee, &folder).await.unwrap();
        assert_eq!(role, Some(ShareRole::Editor));
    }
}
