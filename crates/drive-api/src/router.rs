//! Route table and layer stack.

use axum::http::{HeaderValue, Method, header};
use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use drive_core::config::server::CorsConfig;

use crate::handlers::{
    auth, file, folder, health, link_share, recent, search, share, star, trash, user,
};
use crate::middleware::{logging, rate_limit};
use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    // Credential endpoints and anonymous link resolution share the
    // strict rate-limit tier.
    let credential_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/link-shares/{token}", get(link_share::resolve))
        .route(
            "/link-shares/{token}/download",
            get(link_share::resolve_download),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::auth_tier,
        ));

    let upload_routes = Router::new()
        .route("/files/init", post(file::init_upload))
        .route("/files/complete", post(file::complete_upload))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::upload_tier,
        ));

    let authed_routes = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/folders", post(folder::create_folder))
        .route("/folders/root", get(folder::root_contents))
        .route(
            "/folders/{id}",
            get(folder::get_contents)
                .patch(folder::update_folder)
                .delete(folder::delete_folder),
        )
        .route(
            "/files/{id}",
            get(file::get_file)
                .patch(file::update_file)
                .delete(file::delete_file),
        )
        .route("/files/{id}/download", get(file::download))
        .route("/users/storage", get(user::storage_usage))
        .route("/shares", post(share::create_share))
        .route("/shares/shared-with-me", get(share::shared_with_me))
        .route("/shares/files/{id}/download", get(share::download_shared))
        .route("/shares/folders/{id}/contents", get(folder::get_contents))
        .route(
            "/shares/resource/{resource_type}/{resource_id}",
            get(share::list_for_resource),
        )
        .route("/shares/{id}", delete(share::revoke))
        .route(
            "/link-shares",
            get(link_share::list_mine).post(link_share::create_link),
        )
        .route(
            "/link-shares/resource/{resource_type}/{resource_id}",
            get(link_share::list_for_resource),
        )
        // Takes the link id. The segment name must match the anonymous
        // resolve route, which merges onto the same path.
        .route("/link-shares/{token}", delete(link_share::revoke))
        .route("/stars", get(star::list).post(star::star))
        .route(
            "/stars/{resource_type}/{resource_id}",
            delete(star::unstar),
        )
        .route("/recents", get(recent::list).post(recent::touch))
        .route("/trash", get(trash::list).delete(trash::empty))
        .route(
            "/trash/{resource_type}/{resource_id}",
            delete(trash::delete_item),
        )
        .route(
            "/trash/{resource_type}/{resource_id}/restore",
            post(trash::restore),
        )
        .route("/search", get(search::search));

    let api = Router::new()
        .merge(credential_routes)
        .merge(upload_routes)
        .merge(authed_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::general_tier,
        ));

    Router::new()
        .route("/health", get(health::health))
        .nest("/api", api)
        .layer(middleware::from_fn(logging::request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(RequestBodyLimitLayer::new(
            state.config.server.body_limit_bytes,
        ))
        .with_state(state)
}

fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    if config.allowed_origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
