//! Login, refresh and password change.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_returns_token_pair() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "rita", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert!(response.data()["access_token"].is_string());
    assert!(response.data()["refresh_token"].is_string());
    assert_eq!(response.data()["token_type"], "Bearer");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new().await;

    let wrong_password = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "rita", "password": "not-the-password" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "nobody", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert_eq!(wrong_password.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_no_shared_master_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "gus", "password": "1234" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_rejects_blank_fields() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_refresh_issues_working_access_token() {
    let app = TestApp::new().await;
    let login = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "rita", "password": PASSWORD })),
            None,
        )
        .await;
    let refresh_token = login.data()["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/refresh?token={refresh_token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let access = response.data()["access_token"].as_str().unwrap().to_string();

    let profile = app.request("GET", "/user", None, Some(&access)).await;
    assert_eq!(profile.status, StatusCode::OK);
    assert_eq!(profile.data()["user"]["username"], "rita");
}

#[tokio::test]
async fn test_token_kinds_are_not_interchangeable() {
    let app = TestApp::new().await;
    let login = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "rita", "password": PASSWORD })),
            None,
        )
        .await;
    let access = login.data()["access_token"].as_str().unwrap().to_string();
    let refresh = login.data()["refresh_token"].as_str().unwrap().to_string();

    let refreshed_with_access = app
        .request("GET", &format!("/refresh?token={access}"), None, None)
        .await;
    assert_eq!(refreshed_with_access.status, StatusCode::UNAUTHORIZED);

    let bearer_refresh = app.request("GET", "/user", None, Some(&refresh)).await;
    assert_eq!(bearer_refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/refresh?token=not.a.jwt", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_or_malformed_bearer() {
    let app = TestApp::new().await;

    let missing = app.request("GET", "/user", None, None).await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["error"], "UNAUTHORIZED");

    let forged = app.request("GET", "/user", None, Some("abc.def.ghi")).await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_password() {
    let app = TestApp::new().await;
    let new_password = "Velvet-Harbor-Compass-77";

    let response = app
        .request(
            "POST",
            "/user/update-password",
            Some(json!({
                "username": "gus",
                "current_password": PASSWORD,
                "new_password": new_password,
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let old = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "gus", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .request(
            "POST",
            "/login",
            Some(json!({ "username": "gus", "password": new_password })),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_password_requires_current_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/user/update-password",
            Some(json!({
                "username": "gus",
                "current_password": "wrong-password",
                "new_password": "Velvet-Harbor-Compass-77",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_password_rejects_weak_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/user/update-password",
            Some(json!({
                "username": "gus",
                "current_password": PASSWORD,
                "new_password": "password",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
