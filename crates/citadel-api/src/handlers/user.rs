//! Caller-scoped profile and visit listings.

use axum::Json;
use axum::extract::State;
use chrono::Utc;

use citadel_service::query::{GroupedVisits, Profile};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /user
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state.query.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(profile)))
}

/// GET /user/visit
pub async fn get_visits(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<GroupedVisits>>, ApiError> {
    let visits = state.query.get_user_visits(&auth, Utc::now()).await?;
    Ok(Json(ApiResponse::ok(visits)))
}
