//! Residence entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use citadel_core::types::id::ResidenceId;

/// A physical address, shared by one or more residents.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Residence {
    pub id: ResidenceId,
    pub address: String,
    /// Free-form metadata (unit, tower, parking spot...).
    pub information: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
