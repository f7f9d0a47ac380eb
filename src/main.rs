//! SchoolHub Server: school-management backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use schoolhub_auth::SessionCleanup;
use schoolhub_core::config::AppConfig;
use schoolhub_core::error::AppError;
use schoolhub_core::traits::DocumentStore;
use schoolhub_database::StoreManager;

#[tokio::main]
async fn main() {
    let env = std::env::var("SCHOOLHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
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

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting SchoolHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Document store ───────────────────────────────────
    tracing::info!(provider = %config.storage.provider, "Initializing document store...");
    let store = StoreManager::new(&config.storage).await?;
    if !store.health_check().await? {
        return Err(AppError::database("Document store failed its health check"));
    }
    let store: Arc<dyn DocumentStore> = Arc::new(store);

    // ── Step 2: Application state ────────────────────────────────
    let state = schoolhub_api::build_state(config.clone(), store);
    tracing::info!(
        credential_scheme = %config.auth.credential_scheme,
        session_ttl_hours = config.session.ttl_hours,
        "Authentication initialized"
    );

    // ── Step 3: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 4: Expired session sweeper ──────────────────────────
    let sweeper_handle = match config.session.cleanup_interval_minutes {
        0 => {
            tracing::info!("Expired session sweeper disabled");
            None
        }
        minutes => {
            let period = minutes.checked_mul(60).map(Duration::from_secs).ok_or_else(|| {
                AppError::configuration(format!(
                    "session.cleanup_interval_minutes = {minutes} is out of range"
                ))
            })?;
            Some(tokio::spawn(run_session_sweeper(
                Arc::clone(&state.session_cleanup),
                period,
                shutdown_rx,
            )))
        }
    };

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app = schoolhub_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("SchoolHub server listening on {}", addr);

    // ── Step 6: Graceful shutdown ────────────────────────────────
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 7: Wait for background tasks ────────────────────────
    if let Some(handle) = sweeper_handle {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Session sweeper did not stop within the grace period");
        }
    }

    tracing::info!("SchoolHub server shut down gracefully");
    Ok(())
}

/// Periodically deactivates expired sessions until shutdown is signalled.
async fn run_session_sweeper(
    cleanup: Arc<SessionCleanup>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(e) = cleanup.run_cleanup().await {
                    tracing::error!(error = %e, "Session cleanup failed");
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    tracing::info!("Session sweeper stopped");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
