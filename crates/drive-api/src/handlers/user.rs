//! User account endpoints beyond the auth flow.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, StorageUsageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/users/storage
pub async fn storage_usage(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<StorageUsageResponse>>> {
    let profile = state.user_service.get_user(user.user_id).await?;
    Ok(Json(ApiResponse::ok(StorageUsageResponse {
        used: profile.storage_used,
        limit: profile.storage_limit,
    })))
}
