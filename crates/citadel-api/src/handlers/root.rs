use axum::Json;

use crate::dto::response::MessageResponse;

/// GET /
pub async fn banner() -> Json<MessageResponse> {
    Json(MessageResponse::new("Safe Citadel API"))
}
