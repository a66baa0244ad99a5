#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Integration test for the complete session journey over the HTTP surface:
//! gated out, log in, pass the gate with the issued cookie, log out, gated
//! out again. Each step replays the cookie the way a browser would.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use inkwell_edge_test_fixtures::{
    create_test_app, create_test_state, extract_session_cookie, login_with_token,
};
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

fn get_with_session(uri: &str, session: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", format!("inkwell_id_token={session}"))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_full_session_journey() {
    let app = create_test_app(create_test_state());

    // 1. Anonymous visit to a protected page bounces to login
    let response = app.clone().oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    let location =
        response.headers().get("location").and_then(|v| v.to_str().ok()).unwrap().to_string();
    assert_eq!(location, "/login?redirect=%2Fdashboard");

    // 2. The login page itself is reachable without a session
    let response = app.clone().oneshot(get("/login")).await.unwrap();
    assert_ne!(response.status(), StatusCode::TEMPORARY_REDIRECT);

    // 3. Login binds the provider token to the session cookie
    let session = login_with_token(&app, "provider-issued-token").await;
    assert_eq!(session, "provider-issued-token");

    // 4. The same protected page now passes the gate (404: no page tier here)
    let response = app.clone().oneshot(get_with_session("/dashboard", &session)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // 5. Logout clears the cookie
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header("cookie", format!("inkwell_id_token={session}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = extract_session_cookie(response.headers()).expect("Clearing cookie");
    assert!(cleared.is_empty());

    // 6. With the cookie gone the gate closes again
    let response = app.oneshot(get("/dashboard")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_reissued_login_replaces_the_session_cookie() {
    let app = create_test_app(create_test_state());

    let first = login_with_token(&app, "token-one").await;
    let second = login_with_token(&app, "token-two").await;

    assert_eq!(first, "token-one");
    assert_eq!(second, "token-two", "A later login overwrites the cookie value");
}
