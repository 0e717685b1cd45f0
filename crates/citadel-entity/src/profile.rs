//! Role profiles attached 1:1 to a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use citadel_core::types::id::{GuardId, ResidentId, UserId};

/// Host profile of a RESIDENT user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Resident {
    pub id: ResidentId,
    pub user_id: UserId,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

/// Gate profile of a GUARD user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Guard {
    pub id: GuardId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}
