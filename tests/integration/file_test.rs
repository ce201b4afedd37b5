//! Upload delegation, quota accounting, and file metadata.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn init_returns_signed_upload_url() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/files/init",
            Some(serde_json::json!({
                "name": "report.pdf",
                "mimeType": "application/pdf",
                "sizeBytes": 2048,
                "folderId": null,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["file"]["name"].as_str().unwrap(), "report.pdf");
    assert_eq!(data["file"]["category"].as_str().unwrap(), "document");
    assert!(data["uploadUrl"]["url"].as_str().unwrap().contains("put"));
}

#[tokio::test]
async fn complete_reconciles_size_with_stored_object() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    // The mock store reports every object at 1024 bytes regardless of
    // the declared size, so completion must adjust both the file row and
    // the owner's usage.
    let response = app
        .request(
            "POST",
            "/api/files/init",
            Some(serde_json::json!({
                "name": "notes.txt",
                "mimeType": "text/plain",
                "sizeBytes": 4096,
                "folderId": null,
            })),
            Some(&token),
        )
        .await;
    let file_id = response.body["data"]["file"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/api/files/complete",
            Some(serde_json::json!({ "fileId": file_id })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["sizeBytes"].as_i64().unwrap(), 1024);

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.body["data"]["storageUsed"].as_i64().unwrap(), 1024);
}

#[tokio::test]
async fn storage_readout_tracks_usage() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    app.upload_file(&token, "a.txt", None).await;
    app.upload_file(&token, "b.txt", None).await;

    let response = app.request("GET", "/api/users/storage", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["used"].as_i64().unwrap(), 2048);
    assert!(response.body["data"]["limit"].as_i64().unwrap() >= 2048);
}

#[tokio::test]
async fn init_rejects_uploads_beyond_quota() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (user_id, token) = app.register("owner@example.com", "Owner", "password123").await;

    sqlx::query("UPDATE users SET storage_limit = 100 WHERE id = $1")
        .bind(user_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/files/init",
            Some(serde_json::json!({
                "name": "big.bin",
                "mimeType": "application/octet-stream",
                "sizeBytes": 2048,
                "folderId": null,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("STORAGE_LIMIT_EXCEEDED"));
}

#[tokio::test]
async fn init_rejects_oversized_declarations() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/files/init",
            Some(serde_json::json!({
                "name": "huge.bin",
                "mimeType": "application/octet-stream",
                "sizeBytes": 6_442_450_944_i64,
                "folderId": null,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("FILE_TOO_LARGE"));
}

#[tokio::test]
async fn rename_and_move_file() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let folder = app.create_folder(&token, "Inbox", None).await;
    let file_id = app.upload_file(&token, "draft.txt", None).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{file_id}"),
            Some(serde_json::json!({ "name": "final.txt", "folderId": folder })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"].as_str().unwrap(), "final.txt");
    assert_eq!(
        response.body["data"]["folderId"].as_str().unwrap(),
        folder.to_string()
    );
}

#[tokio::test]
async fn download_returns_signed_url_and_touches_recents() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let file_id = app.upload_file(&token, "movie.mp4", None).await;

    let response = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/download"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.body["data"]["downloadUrl"]["url"]
            .as_str()
            .unwrap()
            .contains("get")
    );

    let response = app.request("GET", "/api/recents", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0]["file"]["id"].as_str().unwrap(),
        file_id.to_string()
    );
}

#[tokio::test]
async fn unknown_file_is_not_found() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let response = app
        .request(
            "GET",
            &format!("/api/files/{}", Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
