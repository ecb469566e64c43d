// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feedback HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::future::Future;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tellbox_core::TellboxError;

use crate::handlers;
use crate::state::AppState;

/// Server bind configuration (mirrors the `[server]` section of
/// `tellbox-config`, so this crate only depends on core).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the feedback API router.
///
/// Routes:
/// - GET  /          service banner
/// - GET  /health    liveness probe
/// - POST /feedback  submit feedback
/// - GET  /feedback  list feedback (paged, sorted)
///
/// CORS is permissive: the browser frontend is served from a different
/// origin and the API carries no credentials.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::get_root))
        .route("/health", get(handlers::get_health))
        .route(
            "/feedback",
            post(handlers::post_feedback).get(handlers::get_feedback),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the feedback HTTP server.
///
/// Binds to the configured host:port and serves until the shutdown future
/// resolves; in-flight requests drain before return.
pub async fn start_server(
    config: &ServerConfig,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), TellboxError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| TellboxError::Http {
            message: format!("failed to bind server to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Feedback server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| TellboxError::Http {
            message: format!("server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
