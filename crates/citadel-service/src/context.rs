//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use citadel_core::types::id::UserId;

/// Who is acting and when the request arrived.
///
/// Only the user id comes from the bearer token; the role is resolved from
/// the store by each operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    pub user_id: UserId,
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }
}
