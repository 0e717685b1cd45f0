//! Enriched read models returned by the query layer.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use citadel_core::types::id::{ResidentId, UserId};
use citadel_entity::{Resident, User, Visit, Visitor};

/// The host of a visit, as shown to gate staff.
#[derive(Debug, Clone, Serialize)]
pub struct ResidentSummary {
    pub id: ResidentId,
    pub user_id: UserId,
    pub name: String,
    pub phone: String,
}

impl ResidentSummary {
    pub fn new(resident: &Resident, user: &User) -> Self {
        Self {
            id: resident.id,
            user_id: user.id,
            name: user.name.clone(),
            phone: resident.phone.clone(),
        }
    }
}

/// A visit with its visitor and, for staff views, its host.
#[derive(Debug, Clone, Serialize)]
pub struct VisitView {
    #[serde(flatten)]
    pub visit: Visit,
    pub visitor: Visitor,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resident: Option<ResidentSummary>,
}

/// Residence block of a resident profile.
#[derive(Debug, Clone, Serialize)]
pub struct ResidenceSummary {
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub information: Option<Value>,
}

/// User block of a resident profile.
#[derive(Debug, Clone, Serialize)]
pub struct ResidentUser {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub phone: String,
    pub role: citadel_entity::UserRole,
}

/// Role-shaped profile.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Resident {
        user: ResidentUser,
        residence: Option<ResidenceSummary>,
    },
    Basic {
        user: User,
    },
}
