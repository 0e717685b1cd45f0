//! Visit request, registration at the gate and cancellation.

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;

use citadel_entity::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_resident_requests_pending_visit_with_qr() {
    let app = TestApp::new().await;
    let token = app.login("rita").await;

    let visit = app.request_visit(&token, "Ana", "2025-01-10").await;

    assert_eq!(visit["state"], "PENDING");
    assert!(visit["qr_id"].is_string());
    assert!(visit["guard_id"].is_null());
    assert!(visit["registered_at"].is_null());
    assert_eq!(visit["resident_id"], json!(app.resident.id));
}

#[tokio::test]
async fn test_guard_walk_in_is_registered_immediately() {
    let app = TestApp::new().await;
    let token = app.login("gus").await;

    let visit = app
        .request_visit(&token, "Courier", &Utc::now().to_rfc3339())
        .await;

    assert_eq!(visit["state"], "REGISTERED");
    assert!(visit["qr_id"].is_null());
    assert!(visit["guard_id"].is_string());
    assert!(visit["registered_at"].is_string());
}

#[tokio::test]
async fn test_request_visit_validation() {
    let app = TestApp::new().await;
    let token = app.login("rita").await;

    for body in [
        json!({ "name": "", "date": "2025-01-10" }),
        json!({ "name": "Ana", "date": "next friday" }),
        json!({ "name": "Zed", "date": "+262142-12-31T23:30" }),
    ] {
        let response = app.request("POST", "/visit/", Some(body), Some(&token)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_admin_cannot_request_visit() {
    let app = TestApp::new().await;
    let token = app.login("ada").await;

    let response = app
        .request(
            "POST",
            "/visit/",
            Some(json!({ "name": "Ana", "date": "2025-01-10" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_guard_registers_visit_once() {
    let app = TestApp::new().await;
    let resident = app.login("rita").await;
    let guard = app.login("gus").await;
    let visit = app.request_visit(&resident, "Ana", "2025-01-10").await;
    let code = app.code_of(&visit).await;

    let first = app
        .request("POST", &format!("/visit/register/{code}"), None, Some(&guard))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.data()["state"], "REGISTERED");
    assert!(first.data()["guard_id"].is_string());
    assert!(first.data()["registered_at"].is_string());

    let second = app
        .request("POST", &format!("/visit/register/{code}"), None, Some(&guard))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.body["error"], "CONFLICT");
}

#[tokio::test]
async fn test_resident_cannot_register() {
    let app = TestApp::new().await;
    let resident = app.login("rita").await;
    let visit = app.request_visit(&resident, "Ana", "2025-01-10").await;
    let code = app.code_of(&visit).await;

    let response = app
        .request("POST", &format!("/visit/register/{code}"), None, Some(&resident))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_unknown_code() {
    let app = TestApp::new().await;
    let guard = app.login("gus").await;

    let response = app
        .request("POST", "/visit/register/no-such-code", None, Some(&guard))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_host_cancels_then_gate_refuses() {
    let app = TestApp::new().await;
    let resident = app.login("rita").await;
    let guard = app.login("gus").await;
    let visit = app.request_visit(&resident, "Ana", "2025-01-10").await;
    let code = app.code_of(&visit).await;

    let cancelled = app
        .request("POST", &format!("/visit/cancel/{code}"), None, Some(&resident))
        .await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.data()["state"], "CANCELLED");

    let register = app
        .request("POST", &format!("/visit/register/{code}"), None, Some(&guard))
        .await;
    assert_eq!(register.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_foreign_resident_cannot_cancel() {
    let app = TestApp::new().await;
    app.create_account("nina", UserRole::Resident, Some("555-0102"))
        .await;
    let host = app.login("rita").await;
    let other = app.login("nina").await;
    let visit = app.request_visit(&host, "Ana", "2025-01-10").await;
    let code = app.code_of(&visit).await;

    let foreign = app
        .request("POST", &format!("/visit/cancel/{code}"), None, Some(&other))
        .await;
    let unknown = app
        .request("POST", "/visit/cancel/no-such-code", None, Some(&other))
        .await;

    assert_eq!(foreign.status, StatusCode::UNAUTHORIZED);
    assert_eq!(foreign.body, unknown.body);
}

#[tokio::test]
async fn test_visit_states_catalogue() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/visit/states", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.data()["visit_state"],
        json!(["PENDING", "REGISTERED", "CANCELLED", "EXPIRED"])
    );
}

#[tokio::test]
async fn test_get_visit_respects_visibility() {
    let app = TestApp::new().await;
    app.create_account("nina", UserRole::Resident, Some("555-0102"))
        .await;
    let host = app.login("rita").await;
    let other = app.login("nina").await;
    let guard = app.login("gus").await;
    let visit = app.request_visit(&host, "Ana", "2025-01-10").await;
    let path = format!("/visit/{}", visit["id"].as_str().unwrap());

    let own = app.request("GET", &path, None, Some(&host)).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["visitor"]["name"], "Ana");
    assert!(own.data().get("resident").is_none());

    let staff = app.request("GET", &path, None, Some(&guard)).await;
    assert_eq!(staff.status, StatusCode::OK);
    assert_eq!(staff.data()["resident"]["phone"], "555-0101");

    let foreign = app.request("GET", &path, None, Some(&other)).await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_visit_rejects_malformed_id() {
    let app = TestApp::new().await;
    let token = app.login("gus").await;

    let response = app.request("GET", "/visit/not-a-uuid", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
