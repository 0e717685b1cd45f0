//! Test helpers: an in-memory application and request plumbing.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use citadel_api::{AppState, Stores, build_router};
use citadel_core::config::AppConfig;
use citadel_core::types::id::QrId;
use citadel_database::MemoryStore;
use citadel_database::store::ProfileStore;
use citadel_entity::{Resident, User, UserRole};
use citadel_service::NewAccount;

/// Password shared by every seeded account.
pub const PASSWORD: &str = "Orchid-Lantern-Gate-42";

/// Response captured from the router.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `data` field of a success envelope.
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

/// The router over a fresh in-memory store, seeded with one account per
/// role and a residence for the resident.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryStore,
    /// Rita's resident profile.
    pub resident: Resident,
}

impl TestApp {
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let store = MemoryStore::new();
        let state = AppState::build(config, Stores::memory(&store), None)
            .expect("Failed to build state");
        let router = build_router(state.clone());

        let rita = create_account(&state, "rita", UserRole::Resident, Some("555-0101")).await;
        create_account(&state, "gus", UserRole::Guard, None).await;
        create_account(&state, "ada", UserRole::Admin, None).await;

        let resident = store
            .find_resident_by_user(rita.id)
            .await
            .expect("Failed to load resident")
            .expect("Resident profile missing");
        let home = state
            .provisioning
            .create_residence("Tower A, 12", None)
            .await
            .expect("Failed to create residence");
        state
            .provisioning
            .assign_residence(resident.id, home.id)
            .await
            .expect("Failed to assign residence");

        Self {
            router,
            state,
            store,
            resident,
        }
    }

    /// Create another account with the shared password.
    pub async fn create_account(&self, username: &str, role: UserRole, phone: Option<&str>) -> User {
        create_account(&self.state, username, role, phone).await
    }

    /// Log in with the shared password and return the access token.
    pub async fn login(&self, username: &str) -> String {
        let response = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({ "username": username, "password": PASSWORD })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {}", response.body);
        response.data()["access_token"]
            .as_str()
            .expect("access_token missing")
            .to_string()
    }

    /// Send a JSON request through the router.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Request a visit as `token` and return the created visit JSON.
    pub async fn request_visit(&self, token: &str, name: &str, date: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/visit/",
                Some(serde_json::json!({ "name": name, "date": date })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "visit request failed: {}",
            response.body
        );
        response.data().clone()
    }

    /// The scannable code behind a visit's QR.
    pub async fn code_of(&self, visit: &Value) -> String {
        use citadel_database::store::VisitStore;

        let qr_id: QrId = visit["qr_id"]
            .as_str()
            .expect("visit has no QR")
            .parse()
            .expect("Invalid QR id");
        self.store
            .find_qr(qr_id)
            .await
            .expect("Failed to load QR")
            .expect("QR missing")
            .code
    }
}

async fn create_account(
    state: &AppState,
    username: &str,
    role: UserRole,
    phone: Option<&str>,
) -> User {
    state
        .provisioning
        .create_user(NewAccount {
            name: username.to_uppercase(),
            username: username.to_string(),
            role,
            password: Some(PASSWORD.to_string()),
            phone: phone.map(String::from),
        })
        .await
        .expect("Failed to create account")
}
