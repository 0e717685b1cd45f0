//! Visit, visitor and QR repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;

use citadel_core::error::{AppError, ErrorKind};
use citadel_core::result::AppResult;
use citadel_core::types::id::{QrId, ResidentId, VisitId, VisitorId};
use citadel_entity::visit::NewVisit;
use citadel_entity::{Qr, Visit, VisitState, Visitor};

use super::map_unique;
use crate::store::{VisitStore, VisitTransition};

#[derive(Debug, Clone)]
pub struct VisitRepository {
    pool: PgPool,
}

impl VisitRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitStore for VisitRepository {
    async fn create_visit(&self, new: NewVisit) -> AppResult<Visit> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let visitor = sqlx::query_as::<_, Visitor>(
            "INSERT INTO visitors (id, name) VALUES ($1, $2) RETURNING *",
        )
        .bind(VisitorId::new())
        .bind(&new.visitor_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create visitor", e))?;

        let qr_id = match &new.qr_code {
            Some(code) => {
                let qr = sqlx::query_as::<_, Qr>(
                    "INSERT INTO qrs (id, code) VALUES ($1, $2) RETURNING *",
                )
                .bind(QrId::new())
                .bind(code)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    map_unique(
                        e,
                        "qrs_code_key",
                        || AppError::conflict("QR code already issued"),
                        "Failed to create qr",
                    )
                })?;
                Some(qr.id)
            }
            None => None,
        };

        let visit = sqlx::query_as::<_, Visit>(
            "INSERT INTO visits \
                (id, scheduled_at, registered_at, state, additional_info, \
                 qr_id, visitor_id, guard_id, resident_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(VisitId::new())
        .bind(new.scheduled_at)
        .bind(new.registered_at)
        .bind(new.state)
        .bind(&new.additional_info)
        .bind(qr_id)
        .bind(visitor.id)
        .bind(new.guard_id)
        .bind(new.resident_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create visit", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit visit creation", e)
        })?;

        Ok(visit)
    }

    async fn find_visit(&self, id: VisitId) -> AppResult<Option<Visit>> {
        sqlx::query_as::<_, Visit>("SELECT * FROM visits WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find visit", e))
    }

    async fn find_visit_by_qr(&self, qr_id: QrId) -> AppResult<Option<Visit>> {
        sqlx::query_as::<_, Visit>("SELECT * FROM visits WHERE qr_id = $1")
            .bind(qr_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find visit by qr", e)
            })
    }

    async fn find_qr(&self, id: QrId) -> AppResult<Option<Qr>> {
        sqlx::query_as::<_, Qr>("SELECT * FROM qrs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find qr", e))
    }

    async fn find_qr_by_code(&self, code: &str) -> AppResult<Option<Qr>> {
        sqlx::query_as::<_, Qr>("SELECT * FROM qrs WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find qr by code", e))
    }

    async fn find_visitor(&self, id: VisitorId) -> AppResult<Option<Visitor>> {
        sqlx::query_as::<_, Visitor>("SELECT * FROM visitors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find visitor", e))
    }

    async fn list_by_resident(&self, resident_id: ResidentId) -> AppResult<Vec<Visit>> {
        sqlx::query_as::<_, Visit>(
            "SELECT * FROM visits WHERE resident_id = $1 ORDER BY created_at, id",
        )
        .bind(resident_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list resident visits", e)
        })
    }

    async fn list_scheduled_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Visit>> {
        sqlx::query_as::<_, Visit>(
            "SELECT * FROM visits \
             WHERE scheduled_at >= $1 AND scheduled_at < $2 \
             ORDER BY scheduled_at, id",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list scheduled visits", e)
        })
    }

    async fn list_pending(&self) -> AppResult<Vec<Visit>> {
        sqlx::query_as::<_, Visit>(
            "SELECT * FROM visits WHERE state = $1 ORDER BY scheduled_at, id",
        )
        .bind(VisitState::Pending)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list pending visits", e))
    }

    async fn transition(&self, id: VisitId, change: VisitTransition) -> AppResult<Visit> {
        // The conditional update row-locks the visit, so a concurrent
        // register/cancel/sweep on the same row sees the committed state.
        let updated = sqlx::query_as::<_, Visit>(
            "UPDATE visits SET \
                state = $3, \
                registered_at = COALESCE($4, registered_at), \
                guard_id = COALESCE($5, guard_id) \
             WHERE id = $1 AND state = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(change.from)
        .bind(change.to)
        .bind(change.registered_at)
        .bind(change.guard_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update visit state", e))?;

        match updated {
            Some(visit) => Ok(visit),
            None => match self.find_visit(id).await? {
                None => Err(AppError::not_found(format!("Visit {id} not found"))),
                Some(current) => {
                    debug!(
                        visit_id = %id,
                        expected = %change.from,
                        actual = %current.state,
                        "Visit state changed before update"
                    );
                    Err(lost_race(current.state, change))
                }
            },
        }
    }
}

/// Conflict reported when the stored state no longer matches `change.from`.
pub(crate) fn lost_race(current: VisitState, change: VisitTransition) -> AppError {
    current
        .transition(change.to)
        .err()
        .unwrap_or_else(|| AppError::conflict("Visit state changed concurrently"))
}
