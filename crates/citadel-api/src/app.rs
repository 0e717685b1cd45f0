//! Server runner: wires stores, services, scheduler and router, then serves
//! until a shutdown signal arrives.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use citadel_core::config::AppConfig;
use citadel_core::error::AppError;
use citadel_database::DatabasePool;
use citadel_worker::jobs::VisitExpiryJob;
use citadel_worker::{CronScheduler, JobExecutor};

use crate::router::build_router;
use crate::state::{AppState, Stores};

/// Runs the Safe Citadel server against PostgreSQL.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Safe Citadel v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    let db = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        tracing::info!("Running database migrations...");
        citadel_database::migration::run_migrations(db.pool()).await?;
        tracing::info!("Database migrations complete");
    }

    // ── Step 2: Services ─────────────────────────────────────────
    let state = AppState::build(config.clone(), Stores::postgres(&db), Some(db.clone()))?;

    // ── Step 3: Scheduled jobs ───────────────────────────────────
    let scheduler = if config.worker.enabled {
        let mut executor = JobExecutor::new();
        executor.register(Arc::new(VisitExpiryJob::new(Arc::clone(&state.lifecycle))));

        let scheduler = CronScheduler::new(Arc::new(executor)).await?;
        scheduler.register_default_tasks(&config.visits).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Worker disabled; expiry sweep will not run");
        None
    };

    // ── Step 4: HTTP server ──────────────────────────────────────
    let app = build_router(state);
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Safe Citadel listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    tokio::select! {
        result = server.into_future() => {
            result.map_err(|e| AppError::internal(format!("Server error: {}", e)))?;
        }
        _ = async {
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!("Shutdown grace period elapsed; dropping open connections");
        }
    }

    // ── Step 5: Teardown ─────────────────────────────────────────
    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    db.close().await;
    tracing::info!("Safe Citadel stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
