//! Folder CRUD, naming rules, and moves.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn created_folder_appears_in_root() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let folder_id = app.create_folder(&token, "Documents", None).await;

    let response = app.request("GET", "/api/folders/root", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let folders = response.body["data"]["folders"].as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["id"].as_str().unwrap(), folder_id.to_string());
    assert_eq!(folders[0]["name"].as_str().unwrap(), "Documents");
    assert!(response.body["data"]["folder"].is_null());
}

#[tokio::test]
async fn duplicate_sibling_name_conflicts() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    app.create_folder(&token, "Photos", None).await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "name": "Photos", "parentId": null })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("DUPLICATE_FOLDER"));
}

#[tokio::test]
async fn same_name_under_different_parents_is_fine() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let parent = app.create_folder(&token, "Projects", None).await;
    app.create_folder(&token, "Archive", None).await;
    let nested = app.create_folder(&token, "Archive", Some(parent)).await;

    let response = app
        .request("GET", &format!("/api/folders/{parent}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let folders = response.body["data"]["folders"].as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["id"].as_str().unwrap(), nested.to_string());
}

#[tokio::test]
async fn rename_and_move_folder() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let parent = app.create_folder(&token, "Parent", None).await;
    let child = app.create_folder(&token, "Child", None).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{child}"),
            Some(serde_json::json!({ "name": "Renamed", "parentId": parent })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"].as_str().unwrap(), "Renamed");
    assert_eq!(
        response.body["data"]["parentId"].as_str().unwrap(),
        parent.to_string()
    );

    let response = app.request("GET", "/api/folders/root", None, Some(&token)).await;
    let folders = response.body["data"]["folders"].as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["id"].as_str().unwrap(), parent.to_string());
}

#[tokio::test]
async fn explicit_null_parent_moves_to_root() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let parent = app.create_folder(&token, "Parent", None).await;
    let child = app.create_folder(&token, "Child", Some(parent)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{child}"),
            Some(serde_json::json!({ "parentId": null })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["parentId"].is_null());
}

#[tokio::test]
async fn moving_folder_into_its_own_subtree_is_rejected() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    let top = app.create_folder(&token, "Top", None).await;
    let mid = app.create_folder(&token, "Mid", Some(top)).await;
    let deep = app.create_folder(&token, "Deep", Some(mid)).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{top}"),
            Some(serde_json::json!({ "parentId": deep })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "PATCH",
            &format!("/api/folders/{top}"),
            Some(serde_json::json!({ "parentId": top })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn folder_names_are_validated() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, token) = app.register("owner@example.com", "Owner", "password123").await;

    for bad in ["", "   ", "a/b", "x".repeat(300).as_str()] {
        let response = app
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({ "name": bad, "parentId": null })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "name {bad:?}");
    }
}

#[tokio::test]
async fn other_users_cannot_see_the_folder() {
    let Some(app) = TestApp::new().await else {
        return;
    };
    let (_, owner) = app.register("owner@example.com", "Owner", "password123").await;
    let (_, other) = app.register("other@example.com", "Other", "password123").await;

    let folder = app.create_folder(&owner, "Private", None).await;

    let response = app
        .request("GET", &format!("/api/folders/{folder}"), None, Some(&other))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), Some("ACCESS_DENIED"));
}
