//! Visit entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use citadel_core::types::id::{GuardId, QrId, ResidentId, VisitId, VisitorId};

use super::state::VisitState;

/// A scheduled or walk-in entry event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Visit {
    pub id: VisitId,
    pub created_at: DateTime<Utc>,
    /// When the visitor is expected at the gate.
    pub scheduled_at: DateTime<Utc>,
    /// Set when the visit reaches `REGISTERED`.
    pub registered_at: Option<DateTime<Utc>>,
    pub state: VisitState,
    pub additional_info: Option<serde_json::Value>,
    /// `None` for walk-in visits.
    pub qr_id: Option<QrId>,
    pub visitor_id: VisitorId,
    /// The guard who registered the visit.
    pub guard_id: Option<GuardId>,
    /// The hosting resident. `None` for walk-ins.
    pub resident_id: Option<ResidentId>,
}

impl Visit {
    pub fn is_walk_in(&self) -> bool {
        self.qr_id.is_none()
    }

    /// Whether a pending visit has outlived `ttl` past its scheduled date.
    ///
    /// A deadline past the representable range is never reached.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        self.state == VisitState::Pending
            && self
                .scheduled_at
                .checked_add_signed(ttl)
                .is_some_and(|deadline| deadline < now)
    }
}

/// Everything needed to persist a visit together with its visitor and
/// optional QR in one unit.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub visitor_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub state: VisitState,
    /// Code for a new QR row; `None` creates a visit without QR.
    pub qr_code: Option<String>,
    pub resident_id: Option<ResidentId>,
    pub guard_id: Option<GuardId>,
    pub registered_at: Option<DateTime<Utc>>,
    pub additional_info: Option<serde_json::Value>,
}
