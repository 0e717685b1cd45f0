//! CLI command definitions and dispatch.

pub mod migrate;
pub mod residence;
pub mod serve;
pub mod user;
pub mod visit;

use clap::{Parser, Subcommand};

use citadel_api::{AppState, Stores};
use citadel_core::config::AppConfig;
use citadel_core::error::AppError;
use citadel_database::DatabasePool;

use crate::output::OutputFormat;

/// Safe Citadel: visitor access control administration
#[derive(Debug, Parser)]
#[command(name = "citadel", version, about, long_about = None)]
pub struct Cli {
    /// Configuration file; defaults to config/default.toml layered with
    /// config/$CITADEL_ENV.toml
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the Safe Citadel server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Residence management
    Residence(residence::ResidenceArgs),
    /// Visit maintenance
    Visit(visit::VisitArgs),
}

impl Cli {
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(self.config.as_deref())?;
        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, config, self.format).await,
            Commands::Residence(args) => residence::execute(args, config, self.format).await,
            Commands::Visit(args) => visit::execute(args, config, self.format).await,
        }
    }
}

/// Helper: load configuration from an explicit file or the layered defaults
pub fn load_config(path: Option<&str>) -> Result<AppConfig, AppError> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => {
            let env = std::env::var("CITADEL_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Helper: connect to PostgreSQL and wire the services
pub async fn connect_state(config: AppConfig) -> Result<AppState, AppError> {
    let db = DatabasePool::connect(&config.database).await?;
    let stores = Stores::postgres(&db);
    AppState::build(config, stores, Some(db))
}
