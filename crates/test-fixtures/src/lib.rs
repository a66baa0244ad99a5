// Test fixtures are allowed to use unwrap/expect for clear failure messages
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Test fixtures and utilities for Inkwell edge integration tests.
//!
//! This crate provides shared test helpers to eliminate duplication across
//! integration tests. All functions are designed to work with the Axum-based
//! edge API driven through `tower::ServiceExt::oneshot`.
//!
//! # Usage
//!
//! ```rust,no_run
//! use inkwell_edge_test_fixtures::{create_test_app, create_test_state, login_with_token};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let state = create_test_state();
//!     let app = create_test_app(state);
//!
//!     let session = login_with_token(&app, "provider-token").await;
//!     // Use session cookie for gated requests...
//! }
//! ```

#![deny(unsafe_code)]

use std::sync::Arc;

use axum::{body::Body, http::Request};
use inkwell_edge_api::{AppState, create_router_with_state};
use inkwell_edge_config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Creates a default test configuration.
///
/// Uses the builder defaults: gate on `/dashboard`, login page at `/login`,
/// secure cookies on. Tests needing other settings build their own
/// [`Config`] and pass it to [`create_test_state_with`].
pub fn create_test_config() -> Arc<Config> {
    Arc::new(Config::builder().build())
}

/// Creates a test AppState from the default test configuration.
pub fn create_test_state() -> AppState {
    create_test_state_with(create_test_config())
}

/// Creates a test AppState from a specific configuration.
pub fn create_test_state_with(config: Arc<Config>) -> AppState {
    AppState::from_config(config)
}

/// Creates a fully configured Axum router with all middleware and routes.
///
/// This is the same router the server runs: gate and logging middleware
/// applied, auth, health, and metrics routes mounted, 404 fallback in place.
/// Use it with `tower::ServiceExt::oneshot` for test requests.
pub fn create_test_app(state: AppState) -> axum::Router {
    create_router_with_state(state)
}

/// Extracts the session cookie value from HTTP response headers.
///
/// Parses the `Set-Cookie` header for the `inkwell_id_token` cookie. A
/// clearing cookie yields `Some("")`, which is distinct from `None` (no
/// session cookie touched at all).
pub fn extract_session_cookie(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| {
            s.split(';').next().and_then(|cookie| cookie.strip_prefix("inkwell_id_token="))
        })
        .map(|s| s.to_string())
}

/// Returns the raw `Set-Cookie` header string for attribute assertions.
pub fn session_cookie_header(headers: &axum::http::HeaderMap) -> Option<String> {
    headers.get("set-cookie").and_then(|v| v.to_str().ok()).map(|s| s.to_string())
}

/// Logs in with an identity token and returns the session cookie value.
///
/// # Panics
///
/// Panics if login fails or no session cookie is returned.
pub async fn login_with_token(app: &axum::Router, token: &str) -> String {
    use axum::http::StatusCode;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header("content-type", "application/json")
                .body(Body::from(json!({ "token": token }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK, "Login should succeed");
    extract_session_cookie(response.headers()).expect("Session cookie should be set")
}

/// Parses an HTTP response body as JSON.
///
/// # Panics
///
/// Panics if the body cannot be read or parsed as valid JSON.
pub async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
