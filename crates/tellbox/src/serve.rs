// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tellbox serve` command implementation.
//!
//! Starts the feedback API on the configured bind address over SQLite
//! storage. Runs until Ctrl-C or SIGTERM, then checkpoints the database
//! on the way out.

use std::sync::Arc;

use tellbox_config::TellboxConfig;
use tellbox_core::{FeedbackStore, TellboxError};
use tellbox_server::{start_server, AppState, ServerConfig};
use tellbox_storage::SqliteFeedbackStore;
use tracing::info;

/// Runs the `tellbox serve` command.
///
/// A storage failure during startup aborts with a non-zero exit; the
/// service never runs without a reachable database.
pub async fn run_serve(config: TellboxConfig) -> Result<(), TellboxError> {
    // Initialize tracing subscriber.
    init_tracing(&config.server.log_level);

    info!("starting tellbox serve");

    // Initialize storage and probe it before accepting traffic.
    let store = SqliteFeedbackStore::new(config.storage.clone());
    store.initialize().await?;
    store.health().await?;
    let store: Arc<dyn FeedbackStore> = Arc::new(store);

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let state = AppState::new(Arc::clone(&store));

    start_server(&server_config, state, shutdown_signal()).await?;

    // The serve future only returns after the shutdown signal fired.
    store.close().await?;
    info!("tellbox serve stopped");

    Ok(())
}

/// Resolves when the process receives Ctrl-C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl-C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tellbox={log_level},tellbox_server={log_level},tellbox_storage={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
