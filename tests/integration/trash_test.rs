//! Soft delete, restore, and emptying the trash.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn deleted_file_lands_in_trash_and_frees_quota() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let file_id = app.upload_file(&token, "old.txt", None).await;

    let response = app
        .request("DELETE", &format!("/api/files/{file_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/api/trash", None, Some(&token)).await;
    let files = response.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["id"].as_str().unwrap(), file_id.to_string());

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.body["data"]["storageUsed"].as_i64().unwrap(), 0);
}

#[tokio::test]
async fn restore_brings_the_file_back() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let file_id = app.upload_file(&token, "precious.txt", None).await;
    app.request("DELETE", &format!("/api/files/{file_id}"), None, Some(&token))
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/trash/file/{file_id}/restore"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.body["data"]["storageUsed"].as_i64().unwrap(), 1024);
}

#[tokio::test]
async fn restore_fails_when_quota_is_gone() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (user_id, token) = app.register("owner@example.com", "Owner", "password123").await;

    let file_id = app.upload_file(&token, "big.txt", None).await;
    app.request("DELETE", &format!("/api/files/{file_id}"), None, Some(&token))
        .await;

    sqlx::query("UPDATE users SET storage_limit = 100 WHERE id = $1")
        .bind(user_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let response = app
        .request(
            "POST",
            &format!("/api/trash/file/{file_id}/restore"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("STORAGE_LIMIT_EXCEEDED"));
}

#[tokio::test]
async fn trashed_folder_hides_from_listings() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let folder = app.create_folder(&token, "Doomed", None).await;

    let response = app
        .request("DELETE", &format!("/api/folders/{folder}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/folders/root", None, Some(&token)).await;
    assert!(response.body["data"]["folders"].as_array().unwrap().is_empty());

    let response = app.request("GET", "/api/trash", None, Some(&token)).await;
    let folders = response.body["data"]["folders"].as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["id"].as_str().unwrap(), folder.to_string());
}

#[tokio::test]
async fn hard_delete_from_trash_is_permanent() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let file_id = app.upload_file(&token, "gone.txt", None).await;
    app.request("DELETE", &format!("/api/files/{file_id}"), None, Some(&token))
        .await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/trash/file/{file_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/trash", None, Some(&token)).await;
    assert!(response.body["data"]["files"].as_array().unwrap().is_empty());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE id = $1")
        .bind(file_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn empty_trash_clears_everything() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let folder = app.create_folder(&token, "Stuff", None).await;
    let file_id = app.upload_file(&token, "junk.txt", None).await;
    app.request("DELETE", &format!("/api/files/{file_id}"), None, Some(&token))
        .await;
    app.request("DELETE", &format!("/api/folders/{folder}"), None, Some(&token))
        .await;

    let response = app.request("DELETE", "/api/trash", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/trash", None, Some(&token)).await;
    assert!(response.body["data"]["files"].as_array().unwrap().is_empty());
    assert!(response.body["data"]["folders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn sweep_purges_only_items_past_retention() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let old_file = app.upload_file(&token, "stale.txt", None).await;
    let young_file = app.upload_file(&token, "recent.txt", None).await;
    app.request("DELETE", &format!("/api/files/{old_file}"), None, Some(&token))
        .await;
    app.request(
        "DELETE",
        &format!("/api/files/{young_file}"),
        None,
        Some(&token),
    )
    .await;

    sqlx::query("UPDATE files SET updated_at = NOW() - INTERVAL '31 days' WHERE id = $1")
        .bind(old_file)
        .execute(&app.pool)
        .await
        .unwrap();
    sqlx::query("UPDATE files SET updated_at = NOW() - INTERVAL '29 days' WHERE id = $1")
        .bind(young_file)
        .execute(&app.pool)
        .await
        .unwrap();

    let stats = app.state.trash_service.purge_expired(30).await.unwrap();
    assert_eq!(stats.files_purged, 1);
    assert_eq!(stats.folders_purged, 0);

    let response = app.request("GET", "/api/trash", None, Some(&token)).await;
    let files = response.body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["id"].as_str().unwrap(), young_file.to_string());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE id = $1")
        .bind(old_file)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn restoring_a_live_file_is_not_found() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let file_id = app.upload_file(&token, "alive.txt", None).await;

    let response = app
        .request(
            "POST",
            &format!("/api/trash/file/{file_id}/restore"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
