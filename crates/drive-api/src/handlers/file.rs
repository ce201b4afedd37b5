//! File endpoints: the signed-URL upload flow, downloads, and metadata
//! CRUD.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use drive_core::AppError;

use crate::dto::request::{CompleteUploadRequest, InitUploadRequest, UpdateFileRequest};
use crate::dto::response::{
    ApiResponse, DownloadResponse, FileResponse, InitUploadResponse, MessageResponse,
};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/files/init
pub async fn init_upload(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<InitUploadRequest>,
) -> ApiResult<Json<ApiResponse<InitUploadResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (file, upload_url) = state
        .file_service
        .init_upload(&user, &req.name, &req.mime_type, req.size_bytes, req.folder_id)
        .await?;

    Ok(Json(ApiResponse::ok(InitUploadResponse {
        file: file.into(),
        upload_url: upload_url.into(),
    })))
}

/// POST /api/files/complete
pub async fn complete_upload(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CompleteUploadRequest>,
) -> ApiResult<Json<ApiResponse<FileResponse>>> {
    let file = state.file_service.complete_upload(&user, req.file_id).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<FileResponse>>> {
    let file = state.file_service.get_file(&user, id).await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// GET /api/files/{id}/download
pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<DownloadResponse>>> {
    let (file, url) = state.file_service.download(&user, id).await?;
    Ok(Json(ApiResponse::ok(DownloadResponse {
        file: file.into(),
        download_url: url.into(),
    })))
}

/// PATCH /api/files/{id}
pub async fn update_file(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFileRequest>,
) -> ApiResult<Json<ApiResponse<FileResponse>>> {
    let file = state
        .file_service
        .update_file(&user, id, req.name.as_deref(), req.folder_id)
        .await?;
    Ok(Json(ApiResponse::ok(file.into())))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.file_service.delete_file(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "File moved to trash",
    })))
}
