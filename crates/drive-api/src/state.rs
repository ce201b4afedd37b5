//! Shared application state threaded through every handler.

use std::sync::Arc;

use sqlx::PgPool;

use drive_auth::TokenDecoder;
use drive_core::config::AppConfig;
use drive_core::traits::ObjectStore;
use drive_database::repositories::{
    FileRepository, FolderRepository, LinkShareRepository, RecentRepository, ShareRepository,
    StarRepository, UserRepository,
};
use drive_service::file::service::FileService;
use drive_service::folder::service::FolderService;
use drive_service::recent::service::RecentService;
use drive_service::search::service::SearchService;
use drive_service::share::access::AccessResolver;
use drive_service::share::link::LinkShareService;
use drive_service::share::service::ShareService;
use drive_service::star::service::StarService;
use drive_service::trash::service::TrashService;
use drive_service::user::service::UserService;

use crate::middleware::rate_limit::RateLimiter;

/// Per-tier rate limiters, keyed by client IP.
#[derive(Debug, Clone)]
pub struct RateLimiters {
    /// Every API request.
    pub general: RateLimiter,
    /// Credential endpoints and public link resolution.
    pub auth: RateLimiter,
    /// Upload initiation.
    pub upload: RateLimiter,
}

/// Everything a handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pool: PgPool,
    pub store: Arc<dyn ObjectStore>,
    pub token_decoder: TokenDecoder,
    pub user_service: UserService,
    pub folder_service: FolderService,
    pub file_service: FileService,
    pub share_service: ShareService,
    pub link_service: LinkShareService,
    pub star_service: StarService,
    pub recent_service: RecentService,
    pub trash_service: TrashService,
    pub search_service: SearchService,
    pub rate_limiters: RateLimiters,
}

impl AppState {
    /// Wires repositories and services onto a connected pool and store.
    pub fn new(config: Arc<AppConfig>, pool: PgPool, store: Arc<dyn ObjectStore>) -> Self {
        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let folder_repo = Arc::new(FolderRepository::new(pool.clone()));
        let file_repo = Arc::new(FileRepository::new(pool.clone()));
        let share_repo = Arc::new(ShareRepository::new(pool.clone()));
        let link_repo = Arc::new(LinkShareRepository::new(pool.clone()));
        let star_repo = Arc::new(StarRepository::new(pool.clone()));
        let recent_repo = Arc::new(RecentRepository::new(pool.clone()));

        let resolver = AccessResolver::new(share_repo.clone(), folder_repo.clone());

        let user_service = UserService::new(user_repo.clone(), &config.auth, &config.storage);
        let folder_service = FolderService::new(
            folder_repo.clone(),
            file_repo.clone(),
            resolver.clone(),
        );
        let file_service = FileService::new(
            file_repo.clone(),
            folder_repo.clone(),
            user_repo.clone(),
            recent_repo.clone(),
            resolver.clone(),
            store.clone(),
            &config.storage,
        );
        let share_service = ShareService::new(
            share_repo.clone(),
            user_repo.clone(),
            file_repo.clone(),
            folder_repo.clone(),
            resolver.clone(),
        );
        let link_service = LinkShareService::new(
            link_repo.clone(),
            file_repo.clone(),
            folder_repo.clone(),
            resolver.clone(),
            store.clone(),
            std::time::Duration::from_secs(config.storage.download_url_ttl_seconds),
        );
        let star_service = StarService::new(
            star_repo.clone(),
            file_repo.clone(),
            folder_repo.clone(),
            resolver.clone(),
        );
        let recent_service = RecentService::new(
            recent_repo.clone(),
            file_repo.clone(),
            folder_repo.clone(),
            resolver.clone(),
        );
        let trash_service = TrashService::new(
            file_repo.clone(),
            folder_repo.clone(),
            user_repo.clone(),
            share_repo.clone(),
            link_repo.clone(),
            star_repo.clone(),
            recent_repo.clone(),
            store.clone(),
        );
        let search_service = SearchService::new(file_repo, folder_repo);

        let rate_limiters = RateLimiters {
            general: RateLimiter::new(
                config.rate_limit.general_max_requests,
                config.rate_limit.general_window_seconds,
            ),
            auth: RateLimiter::new(
                config.rate_limit.auth_max_requests,
                config.rate_limit.auth_window_seconds,
            ),
            upload: RateLimiter::new(
                config.rate_limit.upload_max_requests,
                config.rate_limit.upload_window_seconds,
            ),
        };

        Self {
            token_decoder: TokenDecoder::new(&config.auth),
            config,
            pool,
            store,
            user_service,
            folder_service,
            file_service,
            share_service,
            link_service,
            star_service,
            recent_service,
            trash_service,
            search_service,
            rate_limiters,
        }
    }
}
