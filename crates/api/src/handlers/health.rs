//! Health check endpoints following Kubernetes API server conventions.
//!
//! The edge holds no database connections or background workers, so
//! readiness and startup follow liveness directly. `/healthz` adds a small
//! JSON summary for humans and uptime dashboards.

use std::{sync::OnceLock, time::Instant};

use axum::Json;
use serde_json::{Value, json};

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

/// Record the process start time for uptime reporting.
///
/// Called once from `serve`; later calls keep the first timestamp.
pub fn mark_started() {
    let _ = STARTED_AT.set(Instant::now());
}

fn uptime_seconds() -> u64 {
    STARTED_AT.get_or_init(Instant::now).elapsed().as_secs()
}

/// Liveness probe
///
/// GET /livez
///
/// Returns 200 whenever the process can answer at all.
pub async fn livez_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Readiness probe
///
/// GET /readyz
///
/// The edge has no dependencies to warm up, so ready as soon as live.
pub async fn readyz_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Startup probe
///
/// GET /startupz
pub async fn startupz_handler() -> Json<Value> {
    readyz_handler().await
}

/// Health summary
///
/// GET /healthz
pub async fn healthz_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "inkwell-edge",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": uptime_seconds(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_livez_reports_ok() {
        let Json(body) = livez_handler().await;
        assert_eq!(body["status"], "ok");
    }

    #[test]
    fn test_mark_started_is_idempotent() {
        mark_started();
        mark_started();
        // Uptime counts from the first mark
        let _ = uptime_seconds();
    }
}
