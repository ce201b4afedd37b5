//! Registration, login, token refresh, logout, and the current-user
//! profile. Token pairs are set as HttpOnly cookies and echoed in the
//! body for non-browser clients.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use validator::Validate;

use drive_auth::TokenPair;
use drive_core::AppError;
use drive_entity::user::model::User;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, MessageResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::auth::{ACCESS_COOKIE, AuthUser, REFRESH_COOKIE};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<AuthResponse>>)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, tokens) = state
        .user_service
        .register(&req.email, &req.name, &req.password)
        .await?;

    Ok(signed_in(jar, user, tokens, &state))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<ApiResponse<AuthResponse>>)> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, tokens) = state.user_service.login(&req.email, &req.password).await?;
    Ok(signed_in(jar, user, tokens, &state))
}

/// POST /api/auth/refresh
///
/// Reads the refresh token from the `refreshToken` cookie, falling back
/// to the request body.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Option<Json<RefreshRequest>>,
) -> ApiResult<(CookieJar, Json<ApiResponse<AuthResponse>>)> {
    let token = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_owned())
        .or_else(|| body.and_then(|Json(req)| req.refresh_token))
        .ok_or_else(|| AppError::unauthorized("Missing refresh token"))?;

    let (user, tokens) = state.user_service.refresh(&token).await?;
    Ok(signed_in(jar, user, tokens, &state))
}

/// POST /api/auth/logout
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar
        .remove(expired_cookie(ACCESS_COOKIE))
        .remove(expired_cookie(REFRESH_COOKIE));
    (
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out",
        })),
    )
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let profile = state.user_service.get_user(user.user_id).await?;
    Ok(Json(ApiResponse::ok(profile.into())))
}

fn signed_in(
    jar: CookieJar,
    user: User,
    tokens: TokenPair,
    state: &AppState,
) -> (CookieJar, Json<ApiResponse<AuthResponse>>) {
    let secure = state.config.auth.secure_cookies;
    let jar = jar
        .add(auth_cookie(
            ACCESS_COOKIE,
            tokens.access_token.clone(),
            tokens.access_ttl_seconds,
            secure,
        ))
        .add(auth_cookie(
            REFRESH_COOKIE,
            tokens.refresh_token.clone(),
            tokens.refresh_ttl_seconds,
            secure,
        ));
    let body = ApiResponse::ok(AuthResponse {
        user: user.into(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    });
    (jar, Json(body))
}

fn auth_cookie(
    name: &'static str,
    value: String,
    max_age_seconds: i64,
    secure: bool,
) -> Cookie<'static> {
    Cookie::build((name, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::seconds(max_age_seconds))
        .build()
}

fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}
