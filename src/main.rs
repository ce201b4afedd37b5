//! Nimbus Drive server entry point.
//!
//! Wires configuration, database, object storage, services, the HTTP
//! router, and the trash sweep scheduler together.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use drive_core::AppError;
use drive_core::config::AppConfig;
use drive_database::DatabasePool;
use drive_worker::SweepScheduler;

#[tokio::main]
async fn main() {
    let env = std::env::var("DRIVE_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber per config, with RUST_LOG winning.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Nimbus Drive v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    drive_database::migration::run_migrations(db.pool()).await?;

    tracing::info!(provider = %config.storage.provider, "Initializing object storage");
    let store = drive_storage::build_object_store(&config.storage)?;

    let config = Arc::new(config);
    let state = drive_api::AppState::new(Arc::clone(&config), db.pool().clone(), store);

    let scheduler = if config.worker.enabled {
        let scheduler =
            SweepScheduler::new(&config.worker, state.trash_service.clone()).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Background scheduler disabled");
        None
    };

    let app = drive_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Nimbus Drive listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(mut scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    db.close().await;

    tracing::info!("Nimbus Drive shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
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
}
