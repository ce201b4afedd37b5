//! Search endpoint.

use axum::Json;
use axum::extract::{Query, State};

use crate::dto::request::SearchQuery;
use crate::dto::response::{ApiResponse, SearchResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/search
pub async fn search(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<ApiResponse<SearchResponse>>> {
    let results = state
        .search_service
        .search(&user, &query.q, query.resource_type, query.category)
        .await?;
    Ok(Json(ApiResponse::ok(SearchResponse {
        files: results.files.into_iter().map(Into::into).collect(),
        folders: results.folders.into_iter().map(Into::into).collect(),
    })))
}
