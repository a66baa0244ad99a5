//! # Inkwell Edge API
//!
//! HTTP surface for the Inkwell edge: the access gate middleware, the
//! session cookie endpoints, and the ambient health and metrics routes.
//!
//! ## AppState
//!
//! [`AppState`] is derived from a validated [`Config`](inkwell_edge_config::Config)
//! and carries the cookie manager and gate policy the handlers share:
//!
//! ```no_run
//! use std::sync::Arc;
//! use inkwell_edge_api::{AppState, create_router_with_state};
//! use inkwell_edge_config::Config;
//!
//! # fn example(config: Arc<Config>) {
//! let state = AppState::from_config(config);
//! let router = create_router_with_state(state);
//! # }
//! ```
//!
//! Tests can assemble the state directly with the builder:
//!
//! ```no_run
//! use std::sync::Arc;
//! use inkwell_edge_api::AppState;
//! use inkwell_edge_config::Config;
//! use inkwell_edge_core::{GatePolicy, SessionCookieManager};
//!
//! # fn example(config: Arc<Config>) {
//! let state = AppState::builder()
//!     .config(config)
//!     .sessions(SessionCookieManager::new(false))
//!     .gate(GatePolicy::default())
//!     .build();
//! # }
//! ```

#![deny(unsafe_code)]

use std::sync::Arc;

use inkwell_edge_config::Config;
use inkwell_edge_core::startup;
use tracing::info;

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::{ApiError, AppState, init_exporter};
pub use inkwell_edge_types::dto::ErrorResponse;
pub use middleware::{logging_middleware, session_gate};
pub use routes::create_router_with_state;

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, initiating shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM signal, initiating shutdown");
        }
    }
}

/// Start the edge HTTP server
pub async fn serve(config: Arc<Config>) -> anyhow::Result<()> {
    let state = AppState::from_config(config.clone());
    let router = routes::create_router_with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;

    // Uptime counts from here; the ready line is the last startup log
    handlers::health::mark_started();
    startup::log_ready("Edge");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {e}"))?;

    Ok(())
}
