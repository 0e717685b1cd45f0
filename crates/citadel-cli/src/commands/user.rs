//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use citadel_core::config::AppConfig;
use citadel_core::error::AppError;
use citadel_entity::{User, UserRole};
use citadel_service::NewAccount;

use crate::output::{self, OutputFormat};

#[derive(Debug, Args)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Create a user with the profile its role requires
    Create {
        /// Display name
        #[arg(long)]
        name: String,
        /// Login name
        #[arg(short, long)]
        username: String,
        /// RESIDENT, GUARD or ADMIN
        #[arg(short, long)]
        role: String,
        /// Phone number (required for residents)
        #[arg(long)]
        phone: Option<String>,
        /// Create the account without a password; it cannot log in
        #[arg(long)]
        no_password: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    id: String,
    name: String,
    username: String,
    role: String,
    active: bool,
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            name: u.name.clone(),
            username: u.username.clone(),
            role: u.role.to_string(),
            active: u.is_active,
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

pub async fn execute(
    args: &UserArgs,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let state = super::connect_state(config).await?;

    match &args.command {
        UserCommand::List => {
            let users = state.provisioning.list_users().await?;
            let rows: Vec<UserRow> = users.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Create {
            name,
            username,
            role,
            phone,
            no_password,
        } => {
            let role: UserRole = role
                .parse()
                .map_err(|_| AppError::validation(format!("Invalid role: {}", role)))?;

            let password = if *no_password {
                None
            } else {
                Some(
                    dialoguer::Password::new()
                        .with_prompt(format!("Password for '{}'", username))
                        .with_confirmation("Confirm password", "Passwords do not match")
                        .interact()
                        .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
                )
            };

            let user = state
                .provisioning
                .create_user(NewAccount {
                    name: name.clone(),
                    username: username.clone(),
                    role,
                    password,
                    phone: phone.clone(),
                })
                .await?;

            output::print_item(&UserRow::from(&user), format);
            output::print_success(&format!("User '{}' created", user.username));
            if !user.can_login() {
                output::print_warning("Account has no password and cannot log in");
            }
        }
    }

    Ok(())
}
