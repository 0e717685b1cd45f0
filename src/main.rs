//! Safe Citadel server: visitor access control for gated residences.
//!
//! Main entry point that loads configuration, initialises logging and hands
//! over to the API crate's server runner.

use tracing_subscriber::{EnvFilter, fmt};

use citadel_core::config::AppConfig;
use citadel_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = citadel_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, `config/{CITADEL_ENV}.toml` and `CITADEL__*`
/// environment overrides, or a single file named by `CITADEL_CONFIG`.
fn load_configuration() -> Result<AppConfig, AppError> {
    if let Ok(path) = std::env::var("CITADEL_CONFIG") {
        return AppConfig::load_from(&path);
    }
    let env = std::env::var("CITADEL_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
