//! Request logging middleware.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};
use inkwell_edge_core::metrics;
use tracing::info;

/// Log method, path, status, and latency for every request.
///
/// Applied outermost so gate redirects and error responses are logged the
/// same as handler responses. Also feeds the HTTP request metrics.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let latency = started.elapsed();

    info!(%method, %path, status, latency_ms = latency.as_millis() as u64, "Request");
    metrics::record_http_request(method.as_str(), &path, status, latency.as_secs_f64());

    response
}
