//! Profiles, visit listings, provisioning and the public endpoints.

use axum::http::StatusCode;
use chrono::Utc;
use serde_json::json;

use citadel_core::types::id::UserId;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_banner_and_health() {
    let app = TestApp::new().await;

    let banner = app.request("GET", "/", None, None).await;
    assert_eq!(banner.status, StatusCode::OK);
    assert_eq!(banner.body["message"], "Safe Citadel API");

    let health = app.request("GET", "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.data()["status"], "ok");
    assert!(health.data().get("database").is_none());
}

#[tokio::test]
async fn test_resident_profile() {
    let app = TestApp::new().await;
    let token = app.login("rita").await;

    let response = app.request("GET", "/user", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["user"]["username"], "rita");
    assert_eq!(data["user"]["phone"], "555-0101");
    assert_eq!(data["user"]["role"], "RESIDENT");
    assert_eq!(data["residence"]["address"], "Tower A, 12");
    assert!(data["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_guard_profile() {
    let app = TestApp::new().await;
    let token = app.login("gus").await;

    let response = app.request("GET", "/user", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["user"]["role"], "GUARD");
    assert!(response.data().get("residence").is_none());
}

#[tokio::test]
async fn test_resident_visits_grouped_by_state() {
    let app = TestApp::new().await;
    let resident = app.login("rita").await;
    let guard = app.login("gus").await;
    let first = app.request_visit(&resident, "Ana", "2025-01-10").await;
    app.request_visit(&resident, "Bo", "2025-01-11").await;
    let code = app.code_of(&first).await;
    app.request("POST", &format!("/visit/register/{code}"), None, Some(&guard))
        .await;

    let response = app.request("GET", "/user/visit", None, Some(&resident)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert_eq!(data["PENDING"].as_array().unwrap().len(), 1);
    assert_eq!(data["PENDING"][0]["visitor"]["name"], "Bo");
    assert_eq!(data["REGISTERED"].as_array().unwrap().len(), 1);
    assert!(data.get("CANCELLED").is_none());
}

#[tokio::test]
async fn test_guard_roster_is_today_only() {
    let app = TestApp::new().await;
    let resident = app.login("rita").await;
    let guard = app.login("gus").await;
    app.request_visit(&resident, "Old friend", "2020-05-01").await;
    app.request_visit(&guard, "Courier", &Utc::now().to_rfc3339())
        .await;

    let response = app.request("GET", "/user/visit", None, Some(&guard)).await;

    assert_eq!(response.status, StatusCode::OK);
    let registered = response.data()["REGISTERED"].as_array().unwrap();
    assert_eq!(registered.len(), 1);
    assert_eq!(registered[0]["visitor"]["name"], "Courier");
    assert!(response.data().get("PENDING").is_none());
}

#[tokio::test]
async fn test_admin_has_no_visit_listing() {
    let app = TestApp::new().await;
    let token = app.login("ada").await;

    let response = app.request("GET", "/user/visit", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_provisions_resident() {
    let app = TestApp::new().await;
    let admin = app.login("ada").await;

    let user = app
        .request(
            "POST",
            "/admin/users",
            Some(json!({
                "name": "Nina",
                "username": "nina",
                "role": "RESIDENT",
                "phone": "555-0102",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(user.status, StatusCode::CREATED);
    assert_eq!(user.data()["role"], "RESIDENT");

    let residence = app
        .request(
            "POST",
            "/admin/residences",
            Some(json!({ "address": "Tower B, 3", "information": { "floor": 3 } })),
            Some(&admin),
        )
        .await;
    assert_eq!(residence.status, StatusCode::CREATED);
    let residence_id = residence.data()["id"].as_str().unwrap().to_string();

    let user_id: UserId = user.data()["id"].as_str().unwrap().parse().unwrap();
    let resident = {
        use citadel_database::store::ProfileStore;
        app.store
            .find_resident_by_user(user_id)
            .await
            .unwrap()
            .unwrap()
    };

    let path = format!("/admin/residences/{residence_id}/residents/{}", resident.id);
    let assigned = app.request("POST", &path, None, Some(&admin)).await;
    assert_eq!(assigned.status, StatusCode::OK);

    let again = app.request("POST", &path, None, Some(&admin)).await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let listing = app.request("GET", "/admin/users", None, Some(&admin)).await;
    assert_eq!(listing.status, StatusCode::OK);
    assert_eq!(listing.data().as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_provisioning_validation() {
    let app = TestApp::new().await;
    let admin = app.login("ada").await;

    let no_phone = app
        .request(
            "POST",
            "/admin/users",
            Some(json!({ "name": "Nina", "username": "nina", "role": "RESIDENT" })),
            Some(&admin),
        )
        .await;
    assert_eq!(no_phone.status, StatusCode::BAD_REQUEST);

    let bad_role = app
        .request(
            "POST",
            "/admin/users",
            Some(json!({ "name": "Nina", "username": "nina", "role": "MAYOR" })),
            Some(&admin),
        )
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);

    let duplicate = app
        .request(
            "POST",
            "/admin/users",
            Some(json!({ "name": "Gus", "username": "gus", "role": "GUARD" })),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let blank_address = app
        .request(
            "POST",
            "/admin/residences",
            Some(json!({ "address": "   " })),
            Some(&admin),
        )
        .await;
    assert_eq!(blank_address.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_provisioning_is_admin_only() {
    let app = TestApp::new().await;

    for username in ["rita", "gus"] {
        let token = app.login(username).await;
        let list = app.request("GET", "/admin/users", None, Some(&token)).await;
        assert_eq!(list.status, StatusCode::UNAUTHORIZED);

        let create = app
            .request(
                "POST",
                "/admin/residences",
                Some(json!({ "address": "Tower C, 1" })),
                Some(&token),
            )
            .await;
        assert_eq!(create.status, StatusCode::UNAUTHORIZED);
    }
}
