//! Explicit share grant endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::Redirect;
use uuid::Uuid;
use validator::Validate;

use drive_core::AppError;
use drive_entity::resource::ResourceType;
use drive_service::share::service::GrantDetails;

use crate::dto::request::CreateShareRequest;
use crate::dto::response::{ApiResponse, GrantResponse, MessageResponse, SharedItemResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/shares
pub async fn create_share(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateShareRequest>,
) -> ApiResult<Json<ApiResponse<GrantResponse>>> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let grant = state
        .share_service
        .create_share(&user, req.resource_type, req.resource_id, &req.email, req.role)
        .await?;
    Ok(Json(ApiResponse::ok(grant_response(grant))))
}

/// GET /api/shares/resource/{resource_type}/{resource_id}
pub async fn list_for_resource(
    State(state): State<AppState>,
    user: AuthUser,
    Path((resource_type, resource_id)): Path<(ResourceType, Uuid)>,
) -> ApiResult<Json<ApiResponse<Vec<GrantResponse>>>> {
    let grants = state
        .share_service
        .list_for_resource(&user, resource_type, resource_id)
        .await?;
    Ok(Json(ApiResponse::ok(
        grants.into_iter().map(grant_response).collect(),
    )))
}

/// DELETE /api/shares/{id}
pub async fn revoke(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.share_service.revoke(&user, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Share revoked",
    })))
}

/// GET /api/shares/shared-with-me
pub async fn shared_with_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<SharedItemResponse>>>> {
    let items = state.share_service.shared_with_me(&user).await?;
    Ok(Json(ApiResponse::ok(
        items
            .into_iter()
            .map(|item| SharedItemResponse {
                share: item.share.into(),
                file: item.file.map(Into::into),
                folder: item.folder.map(Into::into),
            })
            .collect(),
    )))
}

/// GET /api/shares/files/{id}/download
///
/// Share-resolved download that hands the client straight to the object
/// store with a temporary redirect.
pub async fn download_shared(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Redirect> {
    let (_, url) = state.file_service.download(&user, id).await?;
    Ok(Redirect::temporary(&url.url))
}

fn grant_response(grant: GrantDetails) -> GrantResponse {
    GrantResponse {
        share: grant.share.into(),
        grantee_email: grant.grantee_email,
        grantee_name: grant.grantee_name,
    }
}
