//! Store traits.
//!
//! Services depend on these seams rather than on concrete repositories.
//! Relationships are never loaded eagerly: callers follow ids through
//! explicit lookups.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use citadel_core::result::AppResult;
use citadel_core::types::id::{
    GuardId, QrId, ResidenceId, ResidentId, UserId, VisitId, VisitorId,
};
use citadel_entity::user::CreateUser;
use citadel_entity::visit::NewVisit;
use citadel_entity::{Guard, Qr, Residence, Resident, User, Visit, VisitState, Visitor};

/// Role profile created alongside a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewProfile {
    Resident { phone: String },
    Guard,
    None,
}

/// A state change applied by [`VisitStore::transition`].
#[derive(Debug, Clone, Copy)]
pub struct VisitTransition {
    pub from: VisitState,
    pub to: VisitState,
    /// Stamped into `registered_at` when set.
    pub registered_at: Option<DateTime<Utc>>,
    /// Recorded as the registering guard when set.
    pub guard_id: Option<GuardId>,
}

#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Create the user and its role profile as one unit.
    ///
    /// Duplicate usernames are `Conflict`.
    async fn create_user(&self, data: &CreateUser, profile: NewProfile) -> AppResult<User>;

    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync + std::fmt::Debug + 'static {
    async fn find_resident(&self, id: ResidentId) -> AppResult<Option<Resident>>;

    async fn find_resident_by_user(&self, user_id: UserId) -> AppResult<Option<Resident>>;

    async fn find_guard_by_user(&self, user_id: UserId) -> AppResult<Option<Guard>>;

    async fn find_residence(&self, id: ResidenceId) -> AppResult<Option<Residence>>;

    /// Residences linked to a resident, in assignment order.
    async fn residences_for_resident(&self, id: ResidentId) -> AppResult<Vec<Residence>>;

    async fn create_residence(
        &self,
        address: &str,
        information: Option<serde_json::Value>,
    ) -> AppResult<Residence>;

    /// Link a resident to a residence. Linking twice is `Conflict`.
    async fn assign_residence(
        &self,
        resident_id: ResidentId,
        residence_id: ResidenceId,
    ) -> AppResult<()>;
}

#[async_trait]
pub trait VisitStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist the visitor, the optional QR and the visit together.
    async fn create_visit(&self, new: NewVisit) -> AppResult<Visit>;

    async fn find_visit(&self, id: VisitId) -> AppResult<Option<Visit>>;

    async fn find_visit_by_qr(&self, qr_id: QrId) -> AppResult<Option<Visit>>;

    async fn find_qr(&self, id: QrId) -> AppResult<Option<Qr>>;

    async fn find_qr_by_code(&self, code: &str) -> AppResult<Option<Qr>>;

    async fn find_visitor(&self, id: VisitorId) -> AppResult<Option<Visitor>>;

    /// Visits hosted by a resident, oldest first.
    async fn list_by_resident(&self, resident_id: ResidentId) -> AppResult<Vec<Visit>>;

    /// Visits scheduled in `[start, end)`, by scheduled date.
    async fn list_scheduled_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Visit>>;

    /// Every visit currently in `PENDING`.
    async fn list_pending(&self) -> AppResult<Vec<Visit>>;

    /// Apply `change` only if the visit is still in `change.from`.
    ///
    /// Returns `NotFound` for an unknown id and `Conflict` when the stored
    /// state no longer matches.
    async fn transition(&self, id: VisitId, change: VisitTransition) -> AppResult<Visit>;
}
