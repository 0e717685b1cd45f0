//! Admin provisioning handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use citadel_core::error::AppError;
use citadel_core::types::id::{ResidenceId, ResidentId};
use citadel_entity::{Residence, User, UserRole};
use citadel_service::NewAccount;

use crate::dto::request::{CreateResidenceRequest, CreateUserRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::path::parse_id;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    require_admin(&state, &auth).await?;
    let users = state.provisioning.list_users().await?;
    Ok(Json(ApiResponse::ok(users)))
}

/// POST /admin/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    require_admin(&state, &auth).await?;
    validate(&req)?;
    let role: UserRole = req
        .role
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid role: {}", req.role)))?;

    let user = state
        .provisioning
        .create_user(NewAccount {
            name: req.name,
            username: req.username,
            role,
            password: req.password,
            phone: req.phone,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(user))))
}

/// POST /admin/residences
pub async fn create_residence(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateResidenceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Residence>>), ApiError> {
    require_admin(&state, &auth).await?;
    validate(&req)?;
    let residence = state
        .provisioning
        .create_residence(&req.address, req.information)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(residence))))
}

/// POST /admin/residences/{id}/residents/{resident_id}
pub async fn assign_residence(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, resident_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    require_admin(&state, &auth).await?;
    let residence_id: ResidenceId = parse_id(&id)?;
    let resident_id: ResidentId = parse_id(&resident_id)?;

    state
        .provisioning
        .assign_residence(resident_id, residence_id)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(
        "Resident assigned to residence",
    ))))
}
