//! Read-only QR verification.
//!
//! Authorization is settled before anything about the visit is assembled,
//! so a resident probing codes learns nothing beyond "not authorized".

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use citadel_core::error::{AppError, ErrorKind};
use citadel_core::result::AppResult;
use citadel_core::types::id::QrId;
use citadel_database::store::VisitStore;
use citadel_entity::{Qr, Residence, Visit, Visitor};

use crate::caller::{Caller, CallerResolver, profile_required};
use crate::context::RequestContext;
use crate::query::{ResidentSummary, VisitEnricher};

/// Everything the gate needs to admit a visitor.
#[derive(Debug, Clone, Serialize)]
pub struct QrVerification {
    pub resident: Option<ResidentSummary>,
    pub visitor: Visitor,
    pub visit: Visit,
    pub residence: Option<Residence>,
}

/// How the QR was presented.
#[derive(Debug, Clone)]
pub enum QrLookup {
    Id(QrId),
    Code(String),
}

#[derive(Debug, Clone)]
pub struct QrVerificationService {
    resolver: Arc<CallerResolver>,
    visits: Arc<dyn VisitStore>,
    enricher: Arc<VisitEnricher>,
}

impl QrVerificationService {
    pub fn new(
        resolver: Arc<CallerResolver>,
        visits: Arc<dyn VisitStore>,
        enricher: Arc<VisitEnricher>,
    ) -> Self {
        Self {
            resolver,
            visits,
            enricher,
        }
    }

    pub async fn verify_qr(&self, ctx: &RequestContext, qr_id: QrId) -> AppResult<QrVerification> {
        self.verify(ctx, QrLookup::Id(qr_id)).await
    }

    pub async fn verify_code(&self, ctx: &RequestContext, code: &str) -> AppResult<QrVerification> {
        self.verify(ctx, QrLookup::Code(code.to_string())).await
    }

    /// Resolve a QR to its visit and assemble the verification payload.
    ///
    /// Guards and admins may verify any QR; an unknown one is `NotFound`.
    /// A resident may only verify QRs of visits they host and gets the same
    /// `Unauthorized` for foreign and unknown QRs alike.
    pub async fn verify(&self, ctx: &RequestContext, lookup: QrLookup) -> AppResult<QrVerification> {
        let caller = self.resolver.resolve(ctx).await.map_err(profile_required)?;
        let denied = || AppError::unauthorized("Not authorized to verify this QR");

        let visit = match (&caller, self.visit_for(&lookup).await) {
            (_, Ok(visit)) => visit,
            (Caller::Resident { .. }, Err(e)) if e.is(ErrorKind::NotFound) => return Err(denied()),
            (_, Err(e)) => return Err(e),
        };

        if let Caller::Resident { resident, .. } = &caller {
            if visit.resident_id != Some(resident.id) {
                return Err(denied());
            }
        }

        let visitor = self.enricher.visitor(&visit).await?;
        let resident = match visit.resident_id {
            Some(id) => self.enricher.resident(id).await?,
            None => None,
        };
        let residence = self.enricher.residence(&visit).await?;

        debug!(visit_id = %visit.id, user_id = %ctx.user_id, "QR verified");
        Ok(QrVerification {
            resident,
            visitor,
            visit,
            residence,
        })
    }

    async fn visit_for(&self, lookup: &QrLookup) -> AppResult<Visit> {
        let qr: Qr = match lookup {
            QrLookup::Id(id) => self.visits.find_qr(*id).await?,
            QrLookup::Code(code) => self.visits.find_qr_by_code(code).await?,
        }
        .ok_or_else(|| AppError::not_found("QR not found"))?;

        self.visits
            .find_visit_by_qr(qr.id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No visit is bound to QR {}", qr.id)))
    }
}
