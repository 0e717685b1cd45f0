//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use citadel_core::error::AppError;

/// Run `validator` rules and report the first failure as `Validation`.
pub fn validate<T: Validate>(req: &T) -> Result<(), AppError> {
    req.validate().map_err(|errors| {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"))
                })
            })
            .next()
            .unwrap_or_else(|| "Invalid request".to_string());
        AppError::validation(message)
    })
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// `GET /refresh?token=...`
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshQuery {
    pub token: String,
}

/// Password change request, authenticated by the current credentials.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Visit request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVisitRequest {
    /// Visitor name.
    #[validate(length(min = 1, max = 200, message = "Visitor name is required"))]
    pub name: String,
    /// Scheduled date.
    pub date: String,
    #[serde(default)]
    pub additional_info: Option<serde_json::Value>,
}

/// Create user request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    /// `RESIDENT`, `GUARD` or `ADMIN`.
    pub role: String,
    pub password: Option<String>,
    /// Required for residents.
    pub phone: Option<String>,
}

/// Create residence request (admin).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateResidenceRequest {
    #[validate(length(min = 1, max = 500))]
    pub address: String,
    #[serde(default)]
    pub information: Option<serde_json::Value>,
}
