//! Case-insensitive name search over the user's own live resources.

use std::sync::Arc;

use drive_core::error::AppError;
use drive_core::result::AppResult;
use drive_database::repositories::{FileRepository, FolderRepository};
use drive_entity::file::category::FileCategory;
use drive_entity::file::model::File;
use drive_entity::folder::model::Folder;
use drive_entity::resource::ResourceType;

use crate::context::RequestContext;

/// Search results split by kind.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub files: Vec<File>,
    pub folders: Vec<Folder>,
}

/// Searches the user's files and folders by name.
///
/// Shared items are deliberately out of scope; search covers what the
/// user owns.
#[derive(Debug, Clone)]
pub struct SearchService {
    file_repo: Arc<FileRepository>,
    folder_repo: Arc<FolderRepository>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(file_repo: Arc<FileRepository>, folder_repo: Arc<FolderRepository>) -> Self {
        Self {
            file_repo,
            folder_repo,
        }
    }

    /// Runs a search. `resource_type` narrows to files or folders;
    /// `category` narrows files by their MIME-derived category and
    /// implies a file-only search.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &str,
        resource_type: Option<ResourceType>,
        category: Option<FileCategory>,
    ) -> AppResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query cannot be empty"));
        }

        let want_files = resource_type != Some(ResourceType::Folder);
        let want_folders = resource_type != Some(ResourceType::File) && category.is_none();

        let mut results = SearchResults::default();
        if want_files {
            let mut files = self.file_repo.search(ctx.user_id, query).await?;
            if let Some(category) = category {
                files.retain(|f| f.category() == category);
            }
            results.files = files;
        }
        if want_folders {
            results.folders = self.folder_repo.search(ctx.user_id, query).await?;
        }
        Ok(results)
    }
}
