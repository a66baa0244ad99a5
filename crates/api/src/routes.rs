use axum::{
    Router,
    http::StatusCode,
    middleware,
    routing::{get, post},
};

use crate::{
    handlers::{auth, health, metrics as metrics_handler},
    middleware::{logging_middleware, session_gate},
};

/// Create router with state and middleware applied
///
/// The gate layer wraps every route, the 404 fallback included, so
/// protected prefixes redirect to login even when nothing is mounted
/// behind them. The auth, health, and metrics endpoints sit outside the
/// protected prefixes and pass the gate untouched.
pub fn create_router_with_state(state: crate::handlers::AppState) -> axum::Router {
    Router::new()
        // Health check endpoints (no authentication)
        // Follow Kubernetes API server conventions (/livez, /readyz, /startupz, /healthz)
        .route("/livez", get(health::livez_handler))
        .route("/readyz", get(health::readyz_handler))
        .route("/startupz", get(health::startupz_handler))
        .route("/healthz", get(health::healthz_handler))
        // Metrics endpoint (no authentication)
        .route("/metrics", get(metrics_handler::metrics_handler))
        // Session cookie endpoints
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        // Pages are rendered by a separate tier; unmatched paths are gated,
        // then answered 404 here
        .fallback(page_stub)
        .with_state(state.clone())
        .layer(middleware::from_fn_with_state(state, session_gate))
        // Add logging middleware to log all requests
        .layer(middleware::from_fn(logging_middleware))
}

/// Fallback for paths the page tier would serve in a full deployment.
async fn page_stub() -> StatusCode {
    StatusCode::NOT_FOUND
}
