//! Profile and visit listings shaped by the caller's role.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Utc};
use tracing::debug;

use citadel_core::error::AppError;
use citadel_core::result::AppResult;
use citadel_database::store::{ProfileStore, VisitStore};
use citadel_entity::VisitState;

use super::enrich::VisitEnricher;
use super::grouping::{Grouped, group_by};
use super::views::{Profile, ResidenceSummary, ResidentUser, VisitView};
use crate::caller::{Caller, CallerResolver, profile_required};
use crate::context::RequestContext;
use crate::dates::local_day_bounds;

/// Visits keyed by state, in first-seen order.
pub type GroupedVisits = Grouped<VisitState, VisitView>;

#[derive(Debug, Clone)]
pub struct QueryService {
    resolver: Arc<CallerResolver>,
    profiles: Arc<dyn ProfileStore>,
    visits: Arc<dyn VisitStore>,
    enricher: Arc<VisitEnricher>,
    local_offset: FixedOffset,
}

impl QueryService {
    pub fn new(
        resolver: Arc<CallerResolver>,
        profiles: Arc<dyn ProfileStore>,
        visits: Arc<dyn VisitStore>,
        enricher: Arc<VisitEnricher>,
        local_offset: FixedOffset,
    ) -> Self {
        Self {
            resolver,
            profiles,
            visits,
            enricher,
            local_offset,
        }
    }

    /// The caller's profile: an aggregate for residents, the bare user
    /// record for everyone else.
    pub async fn get_profile(&self, ctx: &RequestContext) -> AppResult<Profile> {
        let caller = self.resolver.resolve(ctx).await.map_err(profile_required)?;

        match caller {
            Caller::Resident { user, resident } => {
                let residence = self
                    .profiles
                    .residences_for_resident(resident.id)
                    .await?
                    .into_iter()
                    .next()
                    .map(|r| ResidenceSummary {
                        address: r.address,
                        created_at: r.created_at,
                        information: r.information,
                    });

                Ok(Profile::Resident {
                    user: ResidentUser {
                        id: user.id,
                        name: user.name,
                        username: user.username,
                        phone: resident.phone,
                        role: user.role,
                    },
                    residence,
                })
            }
            Caller::Guard { user, .. } | Caller::Admin { user } => Ok(Profile::Basic { user }),
        }
    }

    /// Visits relevant to the caller, grouped by state.
    ///
    /// Residents see every visit they host. Guards see every visit scheduled
    /// on the local calendar day containing `now`, with its host attached.
    pub async fn get_user_visits(
        &self,
        ctx: &RequestContext,
        now: DateTime<Utc>,
    ) -> AppResult<GroupedVisits> {
        let caller = self.resolver.resolve(ctx).await.map_err(profile_required)?;

        let views = match caller {
            Caller::Resident { resident, .. } => {
                let visits = self.visits.list_by_resident(resident.id).await?;
                self.enricher.views(visits, false).await?
            }
            Caller::Guard { guard, .. } => {
                let (start, end) = local_day_bounds(now, self.local_offset)?;
                debug!(guard_id = %guard.id, %start, %end, "Listing day roster");
                let visits = self.visits.list_scheduled_between(start, end).await?;
                self.enricher.views(visits, true).await?
            }
            Caller::Admin { .. } => {
                return Err(AppError::unauthorized(
                    "Visit listings are available to residents and guards",
                ));
            }
        };

        Ok(group_by(views, |view| view.visit.state))
    }
}
