//! Resident, guard and residence repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use citadel_core::error::{AppError, ErrorKind};
use citadel_core::result::AppResult;
use citadel_core::types::id::{ResidenceId, ResidentId, UserId};
use citadel_entity::{Guard, Residence, Resident};

use super::map_unique;
use crate::store::ProfileStore;

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_resident(&self, id: ResidentId) -> AppResult<Option<Resident>> {
        sqlx::query_as::<_, Resident>("SELECT * FROM residents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find resident", e))
    }

    async fn find_resident_by_user(&self, user_id: UserId) -> AppResult<Option<Resident>> {
        sqlx::query_as::<_, Resident>("SELECT * FROM residents WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find resident by user", e)
            })
    }

    async fn find_guard_by_user(&self, user_id: UserId) -> AppResult<Option<Guard>> {
        sqlx::query_as::<_, Guard>("SELECT * FROM guards WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find guard by user", e)
            })
    }

    async fn find_residence(&self, id: ResidenceId) -> AppResult<Option<Residence>> {
        sqlx::query_as::<_, Residence>("SELECT * FROM residences WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find residence", e))
    }

    async fn residences_for_resident(&self, id: ResidentId) -> AppResult<Vec<Residence>> {
        sqlx::query_as::<_, Residence>(
            "SELECT r.* FROM residences r \
             JOIN residents_residences rr ON rr.residence_id = r.id \
             WHERE rr.resident_id = $1 \
             ORDER BY rr.created_at, r.address",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list resident residences", e)
        })
    }

    async fn create_residence(
        &self,
        address: &str,
        information: Option<serde_json::Value>,
    ) -> AppResult<Residence> {
        sqlx::query_as::<_, Residence>(
            "INSERT INTO residences (id, address, information) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(ResidenceId::new())
        .bind(address)
        .bind(information)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create residence", e))
    }

    async fn assign_residence(
        &self,
        resident_id: ResidentId,
        residence_id: ResidenceId,
    ) -> AppResult<()> {
        sqlx::query("INSERT INTO residents_residences (resident_id, residence_id) VALUES ($1, $2)")
            .bind(resident_id)
            .bind(residence_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                map_unique(
                    e,
                    "residents_residences_pkey",
                    || {
                        AppError::conflict(format!(
                            "Resident {resident_id} is already assigned to residence {residence_id}"
                        ))
                    },
                    "Failed to assign residence",
                )
            })?;
        Ok(())
    }
}
