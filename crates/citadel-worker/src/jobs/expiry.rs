//! Hourly expiry of stale pending visits.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing;

use citadel_service::VisitLifecycleService;

use crate::executor::{JobExecutionError, JobHandler};

pub const JOB_TYPE: &str = "visit_expiry";

#[derive(Debug)]
pub struct VisitExpiryJob {
    lifecycle: Arc<VisitLifecycleService>,
}

impl VisitExpiryJob {
    pub fn new(lifecycle: Arc<VisitLifecycleService>) -> Self {
        Self { lifecycle }
    }
}

#[async_trait]
impl JobHandler for VisitExpiryJob {
    fn job_type(&self) -> &str {
        JOB_TYPE
    }

    async fn execute(&self) -> Result<Option<Value>, JobExecutionError> {
        let ttl = self.lifecycle.expiry_ttl();
        let report = self
            .lifecycle
            .expire_stale_pending_visits(Utc::now(), ttl)
            .await;

        if report.aborted {
            return Err(JobExecutionError::Transient(format!(
                "Visit expiry sweep could not read pending visits: {}",
                report.errors.join("; ")
            )));
        }
        if !report.is_clean() {
            tracing::warn!(
                failed = report.failed,
                errors = ?report.errors,
                "Visit expiry sweep finished with errors"
            );
        }

        let mut summary = serde_json::to_value(&report).map_err(|e| {
            JobExecutionError::Permanent(format!("Failed to serialize sweep report: {}", e))
        })?;
        summary["task"] = Value::from(JOB_TYPE);
        summary["ttl_hours"] = Value::from(ttl.num_hours());
        Ok(Some(summary))
    }
}
