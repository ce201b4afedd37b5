//! Folder CRUD endpoints.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use drive_core::AppError;
use drive_service::folder::service::FolderContents;

use crate::dto::request::{CreateFolderRequest, UpdateFolderRequest};
use crate::dto::response::{
    ApiResponse, FolderContentsResponse, FolderResponse, MessageResponse,
};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> ApiResult<Json<ApiResponse<FolderResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let folder = state
        .folder_service
        .create_folder(&user, &req.name, req.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folder.into())))
}

/// GET /api/folders/root
pub async fn root_contents(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<FolderContentsResponse>>> {
    let contents = state.folder_service.list_root_contents(&user).await?;
    Ok(Json(ApiResponse::ok(contents_response(contents))))
}

/// GET /api/folders/{id}
pub async fn get_contents(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<FolderContentsResponse>>> {
    let contents = state.folder_service.get_contents(&user, id).await?;
    Ok(Json(ApiResponse::ok(contents_response(contents))))
}

/// PATCH /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFolderRequest>,
) -> ApiResult<Json<ApiResponse<FolderResponse>>> {
    let folder = state
        .folder_service
        .update_folder(&user, id, req.name.as_deref(), req.parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(folder.into())))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.folder_service.delete_folder(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Folder moved to trash",
    })))
}

fn contents_response(contents: FolderContents) -> FolderContentsResponse {
    FolderContentsResponse {
        folder: contents.folder.map(Into::into),
        folders: contents.folders.into_iter().map(Into::into).collect(),
        files: contents.files.into_iter().map(Into::into).collect(),
    }
}
