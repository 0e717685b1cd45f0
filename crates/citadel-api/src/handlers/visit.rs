//! Visit creation, lookup and gate transitions.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use citadel_core::types::id::VisitId;
use citadel_entity::Visit;
use citadel_service::query::VisitView;
use citadel_service::{VisitLifecycleService, VisitRequest};

use crate::dto::request::CreateVisitRequest;
use crate::dto::response::{ApiResponse, VisitStatesResponse};
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::extractors::path::parse_id;
use crate::state::AppState;

/// POST /visit/
pub async fn create_visit(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateVisitRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Visit>>), ApiError> {
    validate(&req)?;
    let visit = state
        .lifecycle
        .request_visit(
            &auth,
            VisitRequest {
                visitor_name: req.name,
                date: req.date,
                additional_info: req.additional_info,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(visit))))
}

/// GET /visit/states
pub async fn visit_states() -> Json<ApiResponse<VisitStatesResponse>> {
    Json(ApiResponse::ok(VisitStatesResponse {
        visit_state: VisitLifecycleService::visit_states().to_vec(),
    }))
}

/// GET /visit/{id}
pub async fn get_visit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<VisitView>>, ApiError> {
    let id: VisitId = parse_id(&id)?;
    let visit = state.lifecycle.get_visit(&auth, id).await?;
    Ok(Json(ApiResponse::ok(visit)))
}

/// POST /visit/register/{code}
pub async fn register_visit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<Visit>>, ApiError> {
    let visit = state.lifecycle.register_visit(&auth, &code).await?;
    Ok(Json(ApiResponse::ok(visit)))
}

/// POST /visit/cancel/{code}
pub async fn cancel_visit(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<Visit>>, ApiError> {
    let visit = state.lifecycle.cancel_visit(&auth, &code).await?;
    Ok(Json(ApiResponse::ok(visit)))
}
