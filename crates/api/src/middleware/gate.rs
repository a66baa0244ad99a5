//! Access gate middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use inkwell_edge_const::auth::SESSION_COOKIE_NAME;
use inkwell_edge_core::{GateDecision, metrics};

use crate::handlers::auth::AppState;

/// Access gate middleware
///
/// Answers every request with PASS or REDIRECT before any handler runs.
/// The check is session-cookie presence only: any non-empty value passes,
/// expired and forged ones included, because the gate is a first fence and
/// never a validator. Paths outside the protected prefixes always pass.
///
/// Redirects are 307 so the original method survives a retry after login.
pub async fn session_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let session_present =
        jar.get(SESSION_COOKIE_NAME).is_some_and(|cookie| !cookie.value().is_empty());

    match state.gate.decide(request.uri().path(), session_present) {
        GateDecision::Pass => {
            metrics::record_gate_decision("pass");
            next.run(request).await
        },
        GateDecision::Redirect(location) => {
            metrics::record_gate_decision("redirect");
            tracing::debug!(path = %request.uri().path(), %location, "Gate redirect");
            Redirect::temporary(&location).into_response()
        },
    }
}
