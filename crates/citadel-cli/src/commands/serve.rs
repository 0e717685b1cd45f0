//! Start the Safe Citadel server.

use clap::Args;

use citadel_core::config::AppConfig;
use citadel_core::error::AppError;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Run without the expiry sweep scheduler
    #[arg(long)]
    pub no_worker: bool,
}

pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.no_worker {
        config.worker.enabled = false;
    }

    println!("Starting Safe Citadel server...");
    println!("  Address: {}", config.server.bind_address());

    citadel_api::run_server(config).await
}
