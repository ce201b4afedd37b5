//! Trash endpoints.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use drive_entity::resource::ResourceType;

use crate::dto::response::{ApiResponse, MessageResponse, TrashResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/trash
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<TrashResponse>>> {
    let contents = state.trash_service.list(&user).await?;
    Ok(Json(ApiResponse::ok(TrashResponse {
        files: contents.files.into_iter().map(Into::into).collect(),
        folders: contents.folders.into_iter().map(Into::into).collect(),
    })))
}

/// POST /api/trash/{resource_type}/{resource_id}/restore
pub async fn restore(
    State(state): State<AppState>,
    user: AuthUser,
    Path((resource_type, resource_id)): Path<(ResourceType, Uuid)>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .trash_service
        .restore(&user, resource_type, resource_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Item restored",
    })))
}

/// DELETE /api/trash/{resource_type}/{resource_id}
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((resource_type, resource_id)): Path<(ResourceType, Uuid)>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state
        .trash_service
        .delete_item(&user, resource_type, resource_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Item permanently deleted",
    })))
}

/// DELETE /api/trash
pub async fn empty(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.trash_service.empty(&user).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Trash emptied",
    })))
}
