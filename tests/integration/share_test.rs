//! Explicit shares: grants, role enforcement, and the ancestor walk.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

async fn share(
    app: &TestApp,
    token: &str,
    resource_type: &str,
    resource_id: Uuid,
    email: &str,
    role: &str,
) -> crate::helpers::TestResponse {
    app.request(
        "POST",
        "/api/shares",
        Some(serde_json::json!({
            "resourceType": resource_type,
            "resourceId": resource_id,
            "email": email,
            "role": role,
        })),
        Some(token),
    )
    .await
}

#[tokio::test]
async fn viewer_can_read_but_not_edit() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let (_, viewer) = app.register("viewer@example.com", "Viewer", "password123").await;

    let file_id = app.upload_file(&owner, "shared.txt", None).await;

    let response = share(&app, &owner, "file", file_id, "viewer@example.com", "viewer").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["granteeEmail"].as_str().unwrap(),
        "viewer@example.com"
    );

    let response = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&viewer))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{file_id}"),
            Some(serde_json::json!({ "name": "hijacked.txt" })),
            Some(&viewer),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("ACCESS_DENIED"));
}

#[tokio::test]
async fn editor_can_rename() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let (_, editor) = app.register("editor@example.com", "Editor", "password123").await;

    let file_id = app.upload_file(&owner, "draft.txt", None).await;
    share(&app, &owner, "file", file_id, "editor@example.com", "editor").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{file_id}"),
            Some(serde_json::json!({ "name": "edited.txt" })),
            Some(&editor),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"].as_str().unwrap(), "edited.txt");
}

#[tokio::test]
async fn folder_share_covers_nested_content() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let (_, grantee) = app.register("grantee@example.com", "Grantee", "password123").await;

    let top = app.create_folder(&owner, "Top", None).await;
    let nested = app.create_folder(&owner, "Nested", Some(top)).await;
    let file_id = app.upload_file(&owner, "deep.txt", Some(nested)).await;

    share(&app, &owner, "folder", top, "grantee@example.com", "viewer").await;

    // Access resolves by walking from the file up through its folders.
    let response = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&grantee))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/folders/{nested}"), None, Some(&grantee))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn shared_download_redirects_to_signed_url() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let (_, viewer) = app.register("viewer@example.com", "Viewer", "password123").await;

    let file_id = app.upload_file(&owner, "clip.mp4", None).await;
    share(&app, &owner, "file", file_id, "viewer@example.com", "viewer").await;

    let response = app
        .request(
            "GET",
            &format!("/api/shares/files/{file_id}/download"),
            None,
            Some(&viewer),
        )
        .await;
    assert_eq!(response.status, StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn sharing_twice_conflicts() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    app.register("grantee@example.com", "Grantee", "password123").await;

    let file_id = app.upload_file(&owner, "once.txt", None).await;

    share(&app, &owner, "file", file_id, "grantee@example.com", "viewer").await;
    let response = share(&app, &owner, "file", file_id, "grantee@example.com", "editor").await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("ALREADY_SHARED"));
}

#[tokio::test]
async fn sharing_with_unknown_email_fails() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let file_id = app.upload_file(&owner, "file.txt", None).await;

    let response = share(&app, &owner, "file", file_id, "ghost@example.com", "viewer").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), Some("USER_NOT_FOUND"));
}

#[tokio::test]
async fn sharing_with_yourself_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let file_id = app.upload_file(&owner, "mine.txt", None).await;

    let response = share(&app, &owner, "file", file_id, "owner@example.com", "viewer").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shared_with_me_lists_the_grant() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let (_, grantee) = app.register("grantee@example.com", "Grantee", "password123").await;

    let file_id = app.upload_file(&owner, "handout.txt", None).await;
    share(&app, &owner, "file", file_id, "grantee@example.com", "viewer").await;

    let response = app
        .request("GET", "/api/shares/shared-with-me", None, Some(&grantee))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(
        items[0]["file"]["id"].as_str().unwrap(),
        file_id.to_string()
    );
    assert_eq!(items[0]["share"]["role"].as_str().unwrap(), "viewer");
}

#[tokio::test]
async fn revoking_cuts_access() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let (_, grantee) = app.register("grantee@example.com", "Grantee", "password123").await;

    let file_id = app.upload_file(&owner, "temp.txt", None).await;
    let response = share(&app, &owner, "file", file_id, "grantee@example.com", "viewer").await;
    let share_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("DELETE", &format!("/api/shares/{share_id}"), None, Some(&owner))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(&grantee))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn only_the_creator_can_revoke() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let (_, grantee) = app.register("grantee@example.com", "Grantee", "password123").await;

    let file_id = app.upload_file(&owner, "held.txt", None).await;
    let response = share(&app, &owner, "file", file_id, "grantee@example.com", "viewer").await;
    let share_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/api/shares/{share_id}"),
            None,
            Some(&grantee),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}
