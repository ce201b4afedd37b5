//! Registration, login, refresh, and profile flows.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn register_and_fetch_profile() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let (user_id, token) = app.register("alice@example.com", "Alice", "correct horse").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let user = &response.body["data"];
    assert_eq!(user["id"].as_str().unwrap(), user_id.to_string());
    assert_eq!(user["email"].as_str().unwrap(), "alice@example.com");
    assert_eq!(user["storageUsed"].as_i64().unwrap(), 0);
    assert!(user["storageLimit"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    app.register("bob@example.com", "Bob", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "bob@example.com",
                "name": "Bob Again",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("USER_EXISTS"));
}

#[tokio::test]
async fn short_password_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "carol@example.com",
                "name": "Carol",
                "password": "short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    app.register("dave@example.com", "Dave", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "dave@example.com",
                "password": "not-the-password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("INVALID_CREDENTIALS"));
}

#[tokio::test]
async fn login_unknown_email_fails_identically() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "password123",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), Some("INVALID_CREDENTIALS"));
}

#[tokio::test]
async fn refresh_issues_new_token_pair() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "email": "erin@example.com",
                "name": "Erin",
                "password": "password123",
            })),
            None,
        )
        .await;
    let refresh_token = response.body["data"]["refreshToken"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": refresh_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let token = response.body["data"]["accessToken"].as_str().unwrap();

    let response = app.request("GET", "/api/auth/me", None, Some(token)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn refresh_rejects_access_token() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let (_, access_token) = app.register("frank@example.com", "Frank", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/auth/refresh",
            Some(serde_json::json!({ "refreshToken": access_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_requires_authentication() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
