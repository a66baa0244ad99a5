#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Integration tests for the health and metrics endpoints.
//!
//! Tests `/livez`, `/readyz`, `/startupz`, `/healthz`, and `/metrics`
//! through the full HTTP router without authentication (public endpoints).

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use inkwell_edge_test_fixtures::{body_json, create_test_app, create_test_state};
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_livez_returns_200() {
    let app = create_test_app(create_test_state());

    let response = app.oneshot(get("/livez")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK, "Livez should always return 200");
}

#[tokio::test]
async fn test_readyz_returns_200() {
    let app = create_test_app(create_test_state());

    let response = app.oneshot(get("/readyz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK, "The edge has no dependencies to wait for");
}

#[tokio::test]
async fn test_startupz_returns_200() {
    let app = create_test_app(create_test_state());

    let response = app.oneshot(get("/startupz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK, "Startupz should return 200 (delegates to readyz)");
}

#[tokio::test]
async fn test_healthz_returns_json_with_expected_fields() {
    let app = create_test_app(create_test_state());

    let response = app.oneshot(get("/healthz")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;

    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert_eq!(json["service"].as_str().unwrap(), "inkwell-edge");
    assert!(json["version"].as_str().is_some(), "Should have a version string");
    assert!(json["uptime_seconds"].as_u64().is_some(), "Should have uptime_seconds");
}

#[tokio::test]
async fn test_health_endpoints_do_not_require_authentication() {
    let app = create_test_app(create_test_state());

    // No cookie header; these must stay reachable for probes
    for path in ["/livez", "/readyz", "/startupz", "/healthz"] {
        let response = app.clone().oneshot(get(path)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::OK,
            "{path} should not require authentication"
        );
    }
}

#[tokio::test]
async fn test_metrics_endpoint_renders_prometheus_text() {
    inkwell_edge_api::init_exporter().expect("exporter should install");
    inkwell_edge_core::metrics::init();

    let app = create_test_app(create_test_state());

    // Generate at least one sample before scraping
    let response = app.clone().oneshot(get("/livez")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(
        text.contains("http_requests_total"),
        "Scrape should include the request counter, got: {text}"
    );
}
