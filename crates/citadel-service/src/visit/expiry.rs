//! Best-effort expiry of stale `PENDING` visits.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use citadel_core::error::ErrorKind;
use citadel_database::store::VisitTransition;
use citadel_entity::VisitState;

use super::lifecycle::VisitLifecycleService;

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SweepReport {
    /// Pending visits examined.
    pub scanned: usize,
    pub expired: usize,
    /// Visits that left `PENDING` between the scan and the update.
    pub skipped: usize,
    pub failed: usize,
    pub errors: Vec<String>,
    /// The pending set could not be read, so nothing was examined.
    pub aborted: bool,
}

impl SweepReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.errors.is_empty()
    }
}

impl VisitLifecycleService {
    /// Move every `PENDING` visit scheduled more than `ttl` before `now` to
    /// `EXPIRED`.
    ///
    /// Each row is updated on its own. A failing row is recorded in the
    /// report and the sweep carries on.
    pub async fn expire_stale_pending_visits(
        &self,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> SweepReport {
        let mut report = SweepReport::default();

        let pending = match self.visits.list_pending().await {
            Ok(pending) => pending,
            Err(e) => {
                warn!(error = %e, "Failed to list pending visits");
                report.errors.push(e.to_string());
                report.aborted = true;
                return report;
            }
        };

        for visit in pending {
            report.scanned += 1;
            if !visit.is_stale(now, ttl) {
                continue;
            }

            let change = VisitTransition {
                from: VisitState::Pending,
                to: VisitState::Expired,
                registered_at: None,
                guard_id: None,
            };
            match self.visits.transition(visit.id, change).await {
                Ok(_) => {
                    debug!(visit_id = %visit.id, "Visit expired");
                    report.expired += 1;
                }
                Err(e) if e.is(ErrorKind::Conflict) => {
                    debug!(visit_id = %visit.id, "Visit left PENDING during sweep");
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!(visit_id = %visit.id, error = %e, "Failed to expire visit");
                    report.failed += 1;
                    report.errors.push(format!("{}: {}", visit.id, e));
                }
            }
        }

        info!(
            scanned = report.scanned,
            expired = report.expired,
            skipped = report.skipped,
            failed = report.failed,
            "Visit expiry sweep finished"
        );
        report
    }
}
