//! Residence management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use citadel_core::config::AppConfig;
use citadel_core::error::AppError;
use citadel_core::types::id::{ResidenceId, ResidentId};

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct ResidenceArgs {
    #[command(subcommand)]
    pub command: ResidenceCommand,
}

#[derive(Debug, Subcommand)]
pub enum ResidenceCommand {
    /// Create a residence
    Create {
        /// Street address
        #[arg(short, long)]
        address: String,
        /// Free-form JSON details
        #[arg(long)]
        info: Option<String>,
    },
    /// Link a resident to a residence
    Assign {
        /// Residence id
        #[arg(long)]
        residence: String,
        /// Resident profile id
        #[arg(long)]
        resident: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct ResidenceRow {
    id: String,
    address: String,
    created_at: String,
}

pub async fn execute(
    args: &ResidenceArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect_state(config).await?;

    match &args.command {
        ResidenceCommand::Create { address, info } => {
            let information = info
                .as_deref()
                .map(serde_json::from_str::<serde_json::Value>)
                .transpose()
                .map_err(|e| AppError::validation(format!("Invalid --info JSON: {}", e)))?;

            let residence = state
                .provisioning
                .create_residence(address, information)
                .await?;

            output::print_item(
                &ResidenceRow {
                    id: residence.id.to_string(),
                    address: residence.address.clone(),
                    created_at: residence.created_at.format("%Y-%m-%d %H:%M").to_string(),
                },
                format,
            );
        }
        ResidenceCommand::Assign {
            residence,
            resident,
        } => {
            let residence_id: ResidenceId = residence
                .parse()
                .map_err(|_| AppError::validation(format!("Invalid residence id: {}", residence)))?;
            let resident_id: ResidentId = resident
                .parse()
                .map_err(|_| AppError::validation(format!("Invalid resident id: {}", resident)))?;

            state
                .provisioning
                .assign_residence(resident_id, residence_id)
                .await?;
            output::print_success("Resident assigned to residence");
        }
    }

    Ok(())
}
