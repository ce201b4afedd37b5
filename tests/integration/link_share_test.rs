//! Public link shares: resolution, passwords, and expiry.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

async fn create_link(
    app: &TestApp,
    token: &str,
    resource_type: &str,
    resource_id: Uuid,
    password: Option<&str>,
) -> String {
    let response = app
        .request(
            "POST",
            "/api/link-shares",
            Some(serde_json::json!({
                "resourceType": resource_type,
                "resourceId": resource_id,
                "password": password,
                "expiresAt": null,
            })),
            Some(token),
        )
        .await;
    assert_eq!(
        response.status,
        StatusCode::OK,
        "Link creation failed: {:?}",
        response.body
    );
    response.body["data"]["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn anyone_can_resolve_an_open_link() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let file_id = app.upload_file(&owner, "public.txt", None).await;

    let link = create_link(&app, &owner, "file", file_id, None).await;

    // No authentication at all.
    let response = app
        .request("GET", &format!("/api/link-shares/{link}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["file"]["id"].as_str().unwrap(),
        file_id.to_string()
    );

    let response = app
        .request(
            "GET",
            &format!("/api/link-shares/{link}/download"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["downloadUrl"]["url"].as_str().is_some());
}

#[tokio::test]
async fn password_protected_link_requires_the_password() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let file_id = app.upload_file(&owner, "secret.txt", None).await;

    let link = create_link(&app, &owner, "file", file_id, Some("hunter2")).await;

    let response = app
        .request("GET", &format!("/api/link-shares/{link}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("PASSWORD_REQUIRED"));

    let response = app
        .request(
            "GET",
            &format!("/api/link-shares/{link}?password=wrong"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("INVALID_PASSWORD"));

    let response = app
        .request(
            "GET",
            &format!("/api/link-shares/{link}?password=hunter2"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn expired_link_is_gone() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let file_id = app.upload_file(&owner, "expiring.txt", None).await;

    let link = create_link(&app, &owner, "file", file_id, None).await;

    sqlx::query("UPDATE link_shares SET expires_at = NOW() - INTERVAL '1 hour' WHERE token = $1")
        .bind(&link)
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app
        .request("GET", &format!("/api/link-shares/{link}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::GONE);
    assert_eq!(response.error_code(), Some("EXPIRED"));
}

#[tokio::test]
async fn past_expiry_is_rejected_at_creation() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let file_id = app.upload_file(&owner, "file.txt", None).await;

    let response = app
        .request(
            "POST",
            "/api/link-shares",
            Some(serde_json::json!({
                "resourceType": "file",
                "resourceId": file_id,
                "password": null,
                "expiresAt": "2000-01-01T00:00:00Z",
            })),
            Some(&owner),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn revoked_link_no_longer_resolves() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let file_id = app.upload_file(&owner, "file.txt", None).await;

    let response = app
        .request(
            "POST",
            "/api/link-shares",
            Some(serde_json::json!({
                "resourceType": "file",
                "resourceId": file_id,
                "password": null,
                "expiresAt": null,
            })),
            Some(&owner),
        )
        .await;
    let link_id = response.body["data"]["id"].as_str().unwrap().to_string();
    let token = response.body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .request("DELETE", &format!("/api/link-shares/{link_id}"), None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/link-shares/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn revocation_requires_authentication() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let file_id = app.upload_file(&owner, "file.txt", None).await;

    let response = app
        .request(
            "POST",
            "/api/link-shares",
            Some(serde_json::json!({
                "resourceType": "file",
                "resourceId": file_id,
                "password": null,
                "expiresAt": null,
            })),
            Some(&owner),
        )
        .await;
    let link_id = response.body["data"]["id"].as_str().unwrap().to_string();
    let token = response.body["data"]["token"].as_str().unwrap().to_string();

    let response = app
        .request("DELETE", &format!("/api/link-shares/{link_id}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    // The link still resolves.
    let response = app
        .request("GET", &format!("/api/link-shares/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let Some(app) = TestApp::new().await else {
        return;
    };

    let response = app
        .request("GET", "/api/link-shares/no-such-token", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn folder_links_resolve_but_do_not_download() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let folder = app.create_folder(&owner, "Album", None).await;

    let link = create_link(&app, &owner, "folder", folder, None).await;

    let response = app
        .request("GET", &format!("/api/link-shares/{link}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["folder"]["id"].as_str().unwrap(),
        folder.to_string()
    );

    let response = app
        .request(
            "GET",
            &format!("/api/link-shares/{link}/download"),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
