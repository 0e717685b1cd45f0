//! QR verification at the gate.

use axum::http::StatusCode;

use citadel_entity::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_guard_sees_full_verification() {
    let app = TestApp::new().await;
    let resident = app.login("rita").await;
    let guard = app.login("gus").await;
    let visit = app.request_visit(&resident, "Ana", "2025-01-10").await;
    let qr_id = visit["qr_id"].as_str().unwrap();

    let response = app
        .request("GET", &format!("/qr/{qr_id}"), None, Some(&guard))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["visitor"]["name"], "Ana");
    assert_eq!(data["visit"]["id"], visit["id"]);
    assert_eq!(data["resident"]["phone"], "555-0101");
    assert_eq!(data["residence"]["address"], "Tower A, 12");
}

#[tokio::test]
async fn test_lookup_by_scanned_code() {
    let app = TestApp::new().await;
    let resident = app.login("rita").await;
    let guard = app.login("gus").await;
    let visit = app.request_visit(&resident, "Ana", "2025-01-10").await;
    let code = app.code_of(&visit).await;

    let response = app
        .request("GET", &format!("/qr/{code}"), None, Some(&guard))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["visit"]["id"], visit["id"]);
}

#[tokio::test]
async fn test_host_can_verify_own_qr() {
    let app = TestApp::new().await;
    let resident = app.login("rita").await;
    let visit = app.request_visit(&resident, "Ana", "2025-01-10").await;
    let qr_id = visit["qr_id"].as_str().unwrap();

    let response = app
        .request("GET", &format!("/qr/{qr_id}"), None, Some(&resident))
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_foreign_and_unknown_qr_look_the_same_to_residents() {
    let app = TestApp::new().await;
    app.create_account("nina", UserRole::Resident, Some("555-0102"))
        .await;
    let host = app.login("rita").await;
    let other = app.login("nina").await;
    let visit = app.request_visit(&host, "Ana", "2025-01-10").await;
    let qr_id = visit["qr_id"].as_str().unwrap();

    let foreign = app
        .request("GET", &format!("/qr/{qr_id}"), None, Some(&other))
        .await;
    let unknown = app
        .request(
            "GET",
            "/qr/00000000-0000-0000-0000-000000000000",
            None,
            Some(&other),
        )
        .await;

    assert_eq!(foreign.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(foreign.body, unknown.body);
}

#[tokio::test]
async fn test_unknown_qr_for_staff() {
    let app = TestApp::new().await;
    let guard = app.login("gus").await;

    let response = app
        .request(
            "GET",
            "/qr/00000000-0000-0000-0000-000000000000",
            None,
            Some(&guard),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_qr_requires_authentication() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/qr/00000000-0000-0000-0000-000000000000", None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
