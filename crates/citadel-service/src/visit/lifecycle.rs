//! Visit creation and gate transitions.

use std::sync::Arc;

use chrono::{Duration, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use citadel_core::config::VisitsConfig;
use citadel_core::error::{AppError, ErrorKind};
use citadel_core::result::AppResult;
use citadel_core::types::id::VisitId;
use citadel_database::store::{VisitStore, VisitTransition};
use citadel_entity::visit::NewVisit;
use citadel_entity::{Qr, Visit, VisitState};

use crate::caller::{Caller, CallerResolver};
use crate::context::RequestContext;
use crate::dates::parse_scheduled_date;
use crate::query::{VisitEnricher, VisitView};

/// A visit request as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisitRequest {
    pub visitor_name: String,
    /// RFC 3339, `YYYY-MM-DDTHH:MM[:SS]` or `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub additional_info: Option<serde_json::Value>,
}

/// Creates visits and moves them along the state machine.
#[derive(Debug, Clone)]
pub struct VisitLifecycleService {
    resolver: Arc<CallerResolver>,
    pub(crate) visits: Arc<dyn VisitStore>,
    enricher: Arc<VisitEnricher>,
    local_offset: FixedOffset,
    expiry_ttl: Duration,
}

impl VisitLifecycleService {
    pub fn new(
        resolver: Arc<CallerResolver>,
        visits: Arc<dyn VisitStore>,
        enricher: Arc<VisitEnricher>,
        config: &VisitsConfig,
    ) -> AppResult<Self> {
        Ok(Self {
            resolver,
            visits,
            enricher,
            local_offset: config.local_offset()?,
            expiry_ttl: config.expiry_ttl()?,
        })
    }

    pub fn expiry_ttl(&self) -> Duration {
        self.expiry_ttl
    }

    /// Create a visit for the caller.
    ///
    /// A guard creates a walk-in: born `REGISTERED`, no QR, stamped with the
    /// guard. Anyone else must own a resident profile and gets a `PENDING`
    /// visit with a fresh QR.
    pub async fn request_visit(
        &self,
        ctx: &RequestContext,
        request: VisitRequest,
    ) -> AppResult<Visit> {
        let caller = self.resolver.resolve(ctx).await?;

        let visitor_name = request.visitor_name.trim();
        if visitor_name.is_empty() {
            return Err(AppError::validation("Visitor name is required"));
        }
        let scheduled_at = parse_scheduled_date(&request.date, self.local_offset)?;

        let new = match caller {
            Caller::Guard { guard, .. } => NewVisit {
                visitor_name: visitor_name.to_string(),
                scheduled_at,
                state: VisitState::Registered,
                qr_code: None,
                resident_id: None,
                guard_id: Some(guard.id),
                registered_at: Some(Utc::now()),
                additional_info: request.additional_info,
            },
            Caller::Resident { resident, .. } => NewVisit {
                visitor_name: visitor_name.to_string(),
                scheduled_at,
                state: VisitState::Pending,
                qr_code: Some(Qr::generate_code()),
                resident_id: Some(resident.id),
                guard_id: None,
                registered_at: None,
                additional_info: request.additional_info,
            },
            Caller::Admin { user } => {
                return Err(AppError::not_found(format!(
                    "No resident profile for user {}",
                    user.id
                )));
            }
        };

        let visit = self.visits.create_visit(new).await?;
        info!(
            visit_id = %visit.id,
            user_id = %ctx.user_id,
            state = %visit.state,
            "Visit created"
        );
        Ok(visit)
    }

    /// Register the visit bound to a scanned QR code. Gate staff only.
    pub async fn register_visit(&self, ctx: &RequestContext, code: &str) -> AppResult<Visit> {
        let caller = self.resolver.resolve(ctx).await?;
        let guard_id = match &caller {
            Caller::Guard { guard, .. } => Some(guard.id),
            Caller::Admin { .. } => None,
            Caller::Resident { .. } => {
                return Err(AppError::unauthorized("Only gate staff can register visits"));
            }
        };

        let visit = self.visit_for_code(code).await?;
        let next = visit.state.transition(VisitState::Registered)?;
        let updated = self
            .visits
            .transition(
                visit.id,
                VisitTransition {
                    from: visit.state,
                    to: next,
                    registered_at: Some(Utc::now()),
                    guard_id,
                },
            )
            .await?;

        info!(visit_id = %updated.id, user_id = %ctx.user_id, "Visit registered");
        Ok(updated)
    }

    /// Cancel the visit bound to a QR code. Gate staff, or the host resident.
    pub async fn cancel_visit(&self, ctx: &RequestContext, code: &str) -> AppResult<Visit> {
        let caller = self.resolver.resolve(ctx).await?;

        let visit = match &caller {
            Caller::Resident { resident, .. } => {
                let denied = || AppError::unauthorized("Not authorized to cancel this visit");
                match self.visit_for_code(code).await {
                    Ok(visit) if visit.resident_id == Some(resident.id) => visit,
                    Ok(_) => return Err(denied()),
                    Err(e) if e.is(ErrorKind::NotFound) => return Err(denied()),
                    Err(e) => return Err(e),
                }
            }
            Caller::Guard { .. } | Caller::Admin { .. } => self.visit_for_code(code).await?,
        };

        let next = visit.state.transition(VisitState::Cancelled)?;
        let updated = self
            .visits
            .transition(
                visit.id,
                VisitTransition {
                    from: visit.state,
                    to: next,
                    registered_at: None,
                    guard_id: None,
                },
            )
            .await?;

        info!(visit_id = %updated.id, user_id = %ctx.user_id, "Visit cancelled");
        Ok(updated)
    }

    /// Fetch one visit. Residents only see visits they host; anything else
    /// is reported as not found.
    pub async fn get_visit(&self, ctx: &RequestContext, id: VisitId) -> AppResult<VisitView> {
        let caller = self.resolver.resolve(ctx).await?;
        let not_found = || AppError::not_found(format!("Visit {id} not found"));

        let visit = self.visits.find_visit(id).await?.ok_or_else(not_found)?;
        if let Caller::Resident { resident, .. } = &caller {
            if visit.resident_id != Some(resident.id) {
                return Err(not_found());
            }
        }

        self.enricher.view(visit, caller.is_staff()).await
    }

    /// Every visit state, in lifecycle order.
    pub fn visit_states() -> &'static [VisitState] {
        &VisitState::ALL
    }

    async fn visit_for_code(&self, code: &str) -> AppResult<Visit> {
        let qr = self
            .visits
            .find_qr_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("QR code not found"))?;
        self.visits
            .find_visit_by_qr(qr.id)
            .await?
            .ok_or_else(|| AppError::not_found("No visit is bound to this QR code"))
    }
}
