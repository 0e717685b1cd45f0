//! Response DTOs.

use serde::{Deserialize, Serialize};

use citadel_entity::VisitState;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `connected` or `unavailable`; absent without a database.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

/// The visit state catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitStatesResponse {
    pub visit_state: Vec<VisitState>,
}
