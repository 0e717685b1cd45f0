//! QR access artifact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use citadel_core::types::id::QrId;

/// Single-use access code bound to exactly one visit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Qr {
    pub id: QrId,
    /// Opaque code rendered into the QR image and scanned at the gate.
    pub code: String,
    pub created_at: DateTime<Utc>,
}

impl Qr {
    /// Generate a fresh opaque code.
    pub fn generate_code() -> String {
        Uuid::new_v4().simple().to_string()
    }
}
