//! Follows a visit's ids to the rows shown next to it.

use std::sync::Arc;

use citadel_core::error::AppError;
use citadel_core::result::AppResult;
use citadel_core::types::id::ResidentId;
use citadel_database::store::{ProfileStore, UserStore, VisitStore};
use citadel_entity::{Residence, Visit, Visitor};

use super::views::{ResidentSummary, VisitView};

#[derive(Debug, Clone)]
pub struct VisitEnricher {
    visits: Arc<dyn VisitStore>,
    users: Arc<dyn UserStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl VisitEnricher {
    pub fn new(
        visits: Arc<dyn VisitStore>,
        users: Arc<dyn UserStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            visits,
            users,
            profiles,
        }
    }

    pub async fn visitor(&self, visit: &Visit) -> AppResult<Visitor> {
        self.visits
            .find_visitor(visit.visitor_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Visitor of visit {} not found", visit.id)))
    }

    pub async fn resident(&self, id: ResidentId) -> AppResult<Option<ResidentSummary>> {
        let Some(resident) = self.profiles.find_resident(id).await? else {
            return Ok(None);
        };
        let user = self
            .users
            .find_user(resident.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User of resident {id} not found")))?;
        Ok(Some(ResidentSummary::new(&resident, &user)))
    }

    /// First residence of the visit's host, if any.
    pub async fn residence(&self, visit: &Visit) -> AppResult<Option<Residence>> {
        match visit.resident_id {
            Some(id) => Ok(self
                .profiles
                .residences_for_resident(id)
                .await?
                .into_iter()
                .next()),
            None => Ok(None),
        }
    }

    /// Attach the visitor and, when `with_resident`, the host summary.
    pub async fn view(&self, visit: Visit, with_resident: bool) -> AppResult<VisitView> {
        let visitor = self.visitor(&visit).await?;
        let resident = match (with_resident, visit.resident_id) {
            (true, Some(id)) => self.resident(id).await?,
            _ => None,
        };
        Ok(VisitView {
            visit,
            visitor,
            resident,
        })
    }

    pub async fn views(&self, visits: Vec<Visit>, with_resident: bool) -> AppResult<Vec<VisitView>> {
        let mut views = Vec::with_capacity(visits.len());
        for visit in visits {
            views.push(self.view(visit, with_resident).await?);
        }
        Ok(views)
    }
}
