//! Visit maintenance commands.

use chrono::Utc;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use citadel_core::config::AppConfig;
use citadel_core::error::AppError;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct VisitArgs {
    #[command(subcommand)]
    pub command: VisitCommand,
}

#[derive(Debug, Subcommand)]
pub enum VisitCommand {
    /// Run one expiry sweep over stale pending visits
    Sweep {
        /// Override visits.expiry_ttl_hours
        #[arg(long)]
        ttl_hours: Option<i64>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct SweepRow {
    scanned: usize,
    expired: usize,
    skipped: usize,
    failed: usize,
}

pub async fn execute(
    args: &VisitArgs,
    mut config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        VisitCommand::Sweep { ttl_hours } => {
            if let Some(hours) = ttl_hours {
                if *hours < 0 {
                    return Err(AppError::validation("--ttl-hours must not be negative"));
                }
                config.visits.expiry_ttl_hours = *hours;
            }

            let state = super::connect_state(config).await?;
            let ttl = state.lifecycle.expiry_ttl();
            let report = state
                .lifecycle
                .expire_stale_pending_visits(Utc::now(), ttl)
                .await;

            output::print_item(
                &SweepRow {
                    scanned: report.scanned,
                    expired: report.expired,
                    skipped: report.skipped,
                    failed: report.failed,
                },
                format,
            );
            for error in &report.errors {
                output::print_warning(error);
            }
            if !report.is_clean() {
                return Err(AppError::internal(format!(
                    "Sweep finished with {} failure(s)",
                    report.errors.len()
                )));
            }
        }
    }

    Ok(())
}
