//! Public link share endpoints.
//!
//! Creation, listing, and revocation require authentication; resolution
//! and download are anonymous, guarded only by the token (and password,
//! when set) and the strict rate-limit tier.

use axum::Json;
use axum::extract::{Path, Query, State};
use uuid::Uuid;

use drive_entity::resource::ResourceType;

use crate::dto::request::{CreateLinkShareRequest, LinkPasswordQuery};
use crate::dto::response::{
    ApiResponse, DownloadResponse, LinkShareResponse, MessageResponse, ResolvedLinkResponse,
};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/link-shares
pub async fn create_link(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateLinkShareRequest>,
) -> ApiResult<Json<ApiResponse<LinkShareResponse>>> {
    let link = state
        .link_service
        .create_link(
            &user,
            req.resource_type,
            req.resource_id,
            req.password.as_deref(),
            req.expires_at,
        )
        .await?;
    Ok(Json(ApiResponse::ok(LinkShareResponse::new(
        link,
        &state.config.server.frontend_url,
    ))))
}

/// GET /api/link-shares
pub async fn list_mine(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<LinkShareResponse>>>> {
    let links = state.link_service.list_mine(&user).await?;
    let frontend = &state.config.server.frontend_url;
    Ok(Json(ApiResponse::ok(
        links
            .into_iter()
            .map(|link| LinkShareResponse::new(link, frontend))
            .collect(),
    )))
}

/// GET /api/link-shares/resource/{resource_type}/{resource_id}
pub async fn list_for_resource(
    State(state): State<AppState>,
    user: AuthUser,
    Path((resource_type, resource_id)): Path<(ResourceType, Uuid)>,
) -> ApiResult<Json<ApiResponse<Vec<LinkShareResponse>>>> {
    let links = state
        .link_service
        .list_for_resource(&user, resource_type, resource_id)
        .await?;
    let frontend = &state.config.server.frontend_url;
    Ok(Json(ApiResponse::ok(
        links
            .into_iter()
            .map(|link| LinkShareResponse::new(link, frontend))
            .collect(),
    )))
}

/// DELETE /api/link-shares/{id}
pub async fn revoke(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.link_service.revoke(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Link revoked",
    })))
}

/// GET /api/link-shares/{token}
pub async fn resolve(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<LinkPasswordQuery>,
) -> ApiResult<Json<ApiResponse<ResolvedLinkResponse>>> {
    let resolved = state
        .link_service
        .resolve(&token, query.password.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(ResolvedLinkResponse {
        resource_type: resolved.link.resource_type,
        file: resolved.file.map(Into::into),
        folder: resolved.folder.map(Into::into),
    })))
}

/// GET /api/link-shares/{token}/download
pub async fn resolve_download(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<LinkPasswordQuery>,
) -> ApiResult<Json<ApiResponse<DownloadResponse>>> {
    let (file, url) = state
        .link_service
        .resolve_download(&token, query.password.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(DownloadResponse {
        file: file.into(),
        download_url: url.into(),
    })))
}
