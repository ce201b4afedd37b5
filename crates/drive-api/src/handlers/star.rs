//! Star endpoints.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use drive_entity::resource::ResourceType;

use crate::dto::request::StarRequest;
use crate::dto::response::{ApiResponse, MessageResponse, StarResponse, StarredItemResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/stars
pub async fn star(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<StarRequest>,
) -> ApiResult<Json<ApiResponse<StarResponse>>> {
    let star = state
        .star_service
        .star(&user, req.resource_type, req.resource_id)
        .await?;
    Ok(Json(ApiResponse::ok(star.into())))
}

/// DELETE /api/stars/{resource_type}/{resource_id}
pub async fn unstar(
    State(state): State<AppState>,
    user: AuthUser,
    Path((resource_type, resource_id)): Path<(ResourceType, Uuid)>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .star_service
        .unstar(&user, resource_type, resource_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Star removed",
    })))
}

/// GET /api/stars
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<StarredItemResponse>>>> {
    let items = state.star_service.list(&user).await?;
    Ok(Json(ApiResponse::ok(
        items
            .into_iter()
            .map(|item| StarredItemResponse {
                star: item.star.into(),
                file: item.file.map(Into::into),
                folder: item.folder.map(Into::into),
            })
            .collect(),
    )))
}
