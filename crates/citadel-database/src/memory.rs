//! In-memory store for tests and single-process tooling.
//!
//! Every entity lives in a flat table keyed by id; links are resolved by
//! scanning those tables. Rows keep insertion order, which stands in for
//! the ordering clauses of the Postgres queries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use citadel_core::error::AppError;
use citadel_core::result::AppResult;
use citadel_core::types::id::{
    GuardId, QrId, ResidenceId, ResidentId, UserId, VisitId, VisitorId,
};
use citadel_entity::user::CreateUser;
use citadel_entity::visit::NewVisit;
use citadel_entity::{Guard, Qr, Residence, Resident, User, Visit, VisitState, Visitor};

use crate::repositories::visit::lost_race;
use crate::store::{NewProfile, ProfileStore, UserStore, VisitStore, VisitTransition};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    residents: Vec<Resident>,
    guards: Vec<Guard>,
    residences: Vec<Residence>,
    /// `(resident, residence)` links in assignment order.
    residents_residences: Vec<(ResidentId, ResidenceId)>,
    visitors: Vec<Visitor>,
    qrs: Vec<Qr>,
    visits: Vec<Visit>,
}

/// Store backed by process memory. Cloning shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of visits stored, in any state.
    pub async fn visit_count(&self) -> usize {
        self.tables.read().await.visits.len()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn create_user(&self, data: &CreateUser, profile: NewProfile) -> AppResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == data.username) {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                data.username
            )));
        }

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: data.name.clone(),
            role: data.role,
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        match profile {
            NewProfile::Resident { phone } => tables.residents.push(Resident {
                id: ResidentId::new(),
                user_id: user.id,
                phone,
                created_at: now,
            }),
            NewProfile::Guard => tables.guards.push(Guard {
                id: GuardId::new(),
                user_id: user.id,
                created_at: now,
            }),
            NewProfile::None => {}
        }

        tables.users.push(user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        user.password_hash = Some(password_hash.to_string());
        user.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn find_resident(&self, id: ResidentId) -> AppResult<Option<Resident>> {
        let tables = self.tables.read().await;
        Ok(tables.residents.iter().find(|r| r.id == id).cloned())
    }

    async fn find_resident_by_user(&self, user_id: UserId) -> AppResult<Option<Resident>> {
        let tables = self.tables.read().await;
        Ok(tables.residents.iter().find(|r| r.user_id == user_id).cloned())
    }

    async fn find_guard_by_user(&self, user_id: UserId) -> AppResult<Option<Guard>> {
        let tables = self.tables.read().await;
        Ok(tables.guards.iter().find(|g| g.user_id == user_id).cloned())
    }

    async fn find_residence(&self, id: ResidenceId) -> AppResult<Option<Residence>> {
        let tables = self.tables.read().await;
        Ok(tables.residences.iter().find(|r| r.id == id).cloned())
    }

    async fn residences_for_resident(&self, id: ResidentId) -> AppResult<Vec<Residence>> {
        let tables = self.tables.read().await;
        Ok(tables
            .residents_residences
            .iter()
            .filter(|(resident_id, _)| *resident_id == id)
            .filter_map(|(_, residence_id)| {
                tables.residences.iter().find(|r| r.id == *residence_id).cloned()
            })
            .collect())
    }

    async fn create_residence(
        &self,
        address: &str,
        information: Option<serde_json::Value>,
    ) -> AppResult<Residence> {
        let residence = Residence {
            id: ResidenceId::new(),
            address: address.to_string(),
            information,
            created_at: Utc::now(),
        };
        self.tables.write().await.residences.push(residence.clone());
        Ok(residence)
    }

    async fn assign_residence(
        &self,
        resident_id: ResidentId,
        residence_id: ResidenceId,
    ) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if !tables.residents.iter().any(|r| r.id == resident_id) {
            return Err(AppError::not_found(format!("Resident {resident_id} not found")));
        }
        if !tables.residences.iter().any(|r| r.id == residence_id) {
            return Err(AppError::not_found(format!("Residence {residence_id} not found")));
        }
        let link = (resident_id, residence_id);
        if tables.residents_residences.contains(&link) {
            return Err(AppError::conflict(format!(
                "Resident {resident_id} is already assigned to residence {residence_id}"
            )));
        }
        tables.residents_residences.push(link);
        Ok(())
    }
}

#[async_trait]
impl VisitStore for MemoryStore {
    async fn create_visit(&self, new: NewVisit) -> AppResult<Visit> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        // Validate everything before the first push so a failure leaves no rows.
        if let Some(code) = &new.qr_code {
            if tables.qrs.iter().any(|q| &q.code == code) {
                return Err(AppError::conflict("QR code already issued"));
            }
        }

        let visitor = Visitor {
            id: VisitorId::new(),
            name: new.visitor_name,
            created_at: now,
            updated_at: now,
        };
        let qr = new.qr_code.map(|code| Qr {
            id: QrId::new(),
            code,
            created_at: now,
        });
        let visit = Visit {
            id: VisitId::new(),
            created_at: now,
            scheduled_at: new.scheduled_at,
            registered_at: new.registered_at,
            state: new.state,
            additional_info: new.additional_info,
            qr_id: qr.as_ref().map(|q| q.id),
            visitor_id: visitor.id,
            guard_id: new.guard_id,
            resident_id: new.resident_id,
        };

        tables.visitors.push(visitor);
        if let Some(qr) = qr {
            tables.qrs.push(qr);
        }
        tables.visits.push(visit.clone());
        Ok(visit)
    }

    async fn find_visit(&self, id: VisitId) -> AppResult<Option<Visit>> {
        let tables = self.tables.read().await;
        Ok(tables.visits.iter().find(|v| v.id == id).cloned())
    }

    async fn find_visit_by_qr(&self, qr_id: QrId) -> AppResult<Option<Visit>> {
        let tables = self.tables.read().await;
        Ok(tables
            .visits
            .iter()
            .find(|v| v.qr_id == Some(qr_id))
            .cloned())
    }

    async fn find_qr(&self, id: QrId) -> AppResult<Option<Qr>> {
        let tables = self.tables.read().await;
        Ok(tables.qrs.iter().find(|q| q.id == id).cloned())
    }

    async fn find_qr_by_code(&self, code: &str) -> AppResult<Option<Qr>> {
        let tables = self.tables.read().await;
        Ok(tables.qrs.iter().find(|q| q.code == code).cloned())
    }

    async fn find_visitor(&self, id: VisitorId) -> AppResult<Option<Visitor>> {
        let tables = self.tables.read().await;
        Ok(tables.visitors.iter().find(|v| v.id == id).cloned())
    }

    async fn list_by_resident(&self, resident_id: ResidentId) -> AppResult<Vec<Visit>> {
        let tables = self.tables.read().await;
        Ok(tables
            .visits
            .iter()
            .filter(|v| v.resident_id == Some(resident_id))
            .cloned()
            .collect())
    }

    async fn list_scheduled_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Visit>> {
        let tables = self.tables.read().await;
        let mut visits: Vec<Visit> = tables
            .visits
            .iter()
            .filter(|v| v.scheduled_at >= start && v.scheduled_at < end)
            .cloned()
            .collect();
        visits.sort_by_key(|v| v.scheduled_at);
        Ok(visits)
    }

    async fn list_pending(&self) -> AppResult<Vec<Visit>> {
        let tables = self.tables.read().await;
        let mut visits: Vec<Visit> = tables
            .visits
            .iter()
            .filter(|v| v.state == VisitState::Pending)
            .cloned()
            .collect();
        visits.sort_by_key(|v| v.scheduled_at);
        Ok(visits)
    }

    async fn transition(&self, id: VisitId, change: VisitTransition) -> AppResult<Visit> {
        let mut tables = self.tables.write().await;
        let visit = tables
            .visits
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or_else(|| AppError::not_found(format!("Visit {id} not found")))?;

        if visit.state != change.from {
            return Err(lost_race(visit.state, change));
        }

        visit.state = change.to;
        if change.registered_at.is_some() {
            visit.registered_at = change.registered_at;
        }
        if change.guard_id.is_some() {
            visit.guard_id = change.guard_id;
        }
        Ok(visit.clone())
    }
}
