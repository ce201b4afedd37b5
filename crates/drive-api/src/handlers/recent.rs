//! Recently-opened endpoints.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::{RecentListQuery, TouchRecentRequest};
use crate::dto::response::{ApiResponse, RecentEntryResponse, RecentResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/recents
pub async fn touch(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<TouchRecentRequest>,
) -> ApiResult<Json<ApiResponse<RecentResponse>>> {
    let item = state
        .recent_service
        .touch(&user, req.resource_type, req.resource_id)
        .await?;
    Ok(Json(ApiResponse::ok(item.into())))
}

/// GET /api/recents
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RecentListQuery>,
) -> ApiResult<Json<ApiResponse<Vec<RecentEntryResponse>>>> {
    let entries = state.recent_service.list(&user, query.limit).await?;
    Ok(Json(ApiResponse::ok(
        entries
            .into_iter()
            .map(|entry| RecentEntryResponse {
                item: entry.item.into(),
                file: entry.file.map(Into::into),
                folder: entry.folder.map(Into::into),
            })
            .collect(),
    )))
}
