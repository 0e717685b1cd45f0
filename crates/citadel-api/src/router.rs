//! Route definitions for the Safe Citadel HTTP API.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .route("/", get(handlers::root::banner))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(visit_routes())
        .merge(qr_routes())
        .merge(admin_routes())
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Login, refresh and password change
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/refresh", get(handlers::auth::refresh))
        .route("/user/update-password", post(handlers::auth::update_password))
}

/// Caller profile and visit listing
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user", get(handlers::user::get_profile))
        .route("/user/visit", get(handlers::user::get_visits))
}

fn visit_routes() -> Router<AppState> {
    Router::new()
        .route("/visit", post(handlers::visit::create_visit))
        .route("/visit/", post(handlers::visit::create_visit))
        .route("/visit/states", get(handlers::visit::visit_states))
        .route("/visit/{id}", get(handlers::visit::get_visit))
        .route(
            "/visit/register/{code}",
            post(handlers::visit::register_visit),
        )
        .route("/visit/cancel/{code}", post(handlers::visit::cancel_visit))
}

fn qr_routes() -> Router<AppState> {
    Router::new().route("/qr/{id}", get(handlers::qr::verify_qr))
}

/// Provisioning; every handler checks the ADMIN role itself
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route(
            "/admin/residences",
            post(handlers::admin::create_residence),
        )
        .route(
            "/admin/residences/{id}/residents/{resident_id}",
            post(handlers::admin::assign_residence),
        )
}
