//! Prometheus metrics endpoint.

use std::sync::OnceLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inkwell_edge_types::{Error as CoreError, Result as CoreResult};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and keep the render handle for `/metrics`.
///
/// Must run before the first metric is recorded or those samples are lost.
/// Repeated calls keep the first recorder.
pub fn init_exporter() -> CoreResult<()> {
    if PROMETHEUS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| CoreError::config(format!("Failed to install metrics recorder: {e}")))?;
    let _ = PROMETHEUS_HANDLE.set(handle);
    Ok(())
}

/// Render current metrics in Prometheus text format
///
/// GET /metrics
pub async fn metrics_handler() -> Response {
    match PROMETHEUS_HANDLE.get() {
        Some(handle) => handle.render().into_response(),
        None => {
            (StatusCode::SERVICE_UNAVAILABLE, "Metrics exporter not initialized").into_response()
        },
    }
}
