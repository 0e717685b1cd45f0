//! Auth handlers: login, refresh, password change.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use citadel_auth::jwt::{AccessToken, TokenPair};

use crate::dto::request::{ChangePasswordRequest, LoginRequest, RefreshQuery};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPair>>, ApiError> {
    validate(&req)?;
    let tokens = state.auth.login(&req.username, &req.password).await?;
    Ok(Json(ApiResponse::ok(tokens)))
}

/// GET /refresh?token=...
pub async fn refresh(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<ApiResponse<AccessToken>>, ApiError> {
    let token = state.auth.refresh(&query.token).await?;
    Ok(Json(ApiResponse::ok(token)))
}

/// POST /user/update-password
pub async fn update_password(
    State(state): State<AppState>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MessageResponse>>), ApiError> {
    validate(&req)?;
    state
        .auth
        .change_password(&req.username, &req.current_password, &req.new_password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(MessageResponse::new(
            "Password changed successfully",
        ))),
    ))
}
