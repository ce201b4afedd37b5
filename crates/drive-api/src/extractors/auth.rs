//! Authenticated-user extractor.
//!
//! Browser clients carry the access token in the HttpOnly `accessToken`
//! cookie; other clients send `Authorization: Bearer`. The cookie wins
//! when both are present.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use drive_core::AppError;
use drive_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Cookie holding the access token.
pub const ACCESS_COOKIE: &str = "accessToken";
/// Cookie holding the refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

/// The authenticated caller, extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)
            .ok_or_else(|| AppError::unauthorized("Missing authentication token"))?;
        let claims = state.token_decoder.decode_access(&token)?;
        Ok(AuthUser(RequestContext::new(claims.sub, claims.email)))
    }
}

fn extract_token(parts: &Parts) -> Option<String> {
    let jar = CookieJar::from_headers(&parts.headers);
    if let Some(cookie) = jar.get(ACCESS_COOKIE) {
        return Some(cookie.value().to_owned());
    }
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_owned())
}
