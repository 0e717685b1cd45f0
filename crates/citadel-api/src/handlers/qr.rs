//! QR verification at the gate.

use axum::Json;
use axum::extract::{Path, State};

use citadel_core::types::id::QrId;
use citadel_service::qr::{QrLookup, QrVerification};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /qr/{id}
///
/// Accepts a QR id or the scanned code itself.
pub async fn verify_qr(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<QrVerification>>, ApiError> {
    let lookup = match id.parse::<QrId>() {
        Ok(qr_id) => QrLookup::Id(qr_id),
        Err(_) => QrLookup::Code(id),
    };
    let verification = state.qr.verify(&auth, lookup).await?;
    Ok(Json(ApiResponse::ok(verification)))
}
