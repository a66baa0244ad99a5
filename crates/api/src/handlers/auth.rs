//! Session cookie endpoints.
//!
//! `POST /api/auth/login` moves a provider-issued identity token into the
//! session cookie; `POST /api/auth/logout` clears it. Neither endpoint
//! inspects the token value: verification already happened at the provider,
//! and the gate only checks presence.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use bon::Builder;
use inkwell_edge_config::Config;
use inkwell_edge_core::{
    GatePolicy, SessionCookieManager, metrics,
    session::{CookieDirective, SameSite as DirectiveSameSite},
};
use inkwell_edge_types::{
    Error as CoreError, IdentityToken,
    dto::{ErrorResponse, LoginRequest, StatusResponse},
};

/// Shared application state for the edge HTTP surface
#[derive(Clone, Builder)]
pub struct AppState {
    /// Validated edge configuration
    pub config: Arc<Config>,
    /// Session cookie issue/revoke policy
    pub sessions: SessionCookieManager,
    /// Protected-path gate policy
    pub gate: GatePolicy,
}

impl AppState {
    /// Build state from a validated configuration.
    pub fn from_config(config: Arc<Config>) -> Self {
        let sessions = SessionCookieManager::new(config.cookie_secure());
        let gate = GatePolicy::new(config.protected_paths.clone(), config.login_path.clone());
        AppState::builder().config(config).sessions(sessions).gate(gate).build()
    }
}

/// API error wrapper converting core errors into HTTP responses
#[derive(Debug)]
pub struct ApiError(pub CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // 5xx details stay in the server logs; clients get a generic body.
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.error_code(), "Request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Result type for API handlers
pub type Result<T> = std::result::Result<T, ApiError>;

/// Apply a cookie directive from the session manager to the jar.
fn apply_directive(jar: CookieJar, directive: CookieDirective) -> CookieJar {
    let same_site = match directive.same_site {
        DirectiveSameSite::Strict => SameSite::Strict,
        DirectiveSameSite::Lax => SameSite::Lax,
        DirectiveSameSite::None => SameSite::None,
    };

    let cookie = Cookie::build((directive.name, directive.value))
        .max_age(time::Duration::seconds(directive.max_age))
        .http_only(directive.http_only)
        .secure(directive.secure)
        .path(directive.path)
        .same_site(same_site)
        .build();

    jar.add(cookie)
}

/// Store an identity token in the session cookie
///
/// POST /api/auth/login
///
/// Returns 400 with `{"error": "Token is required"}` when the token is
/// missing or empty, 200 with `{"status": "success"}` and a Set-Cookie
/// header otherwise.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginRequest>,
) -> Result<(CookieJar, Json<StatusResponse>)> {
    let token = IdentityToken::new(payload.token);

    let directive = match state.sessions.issue(&token) {
        Ok(directive) => directive,
        Err(err) => {
            metrics::record_auth_attempt("login", false);
            return Err(err.into());
        },
    };

    metrics::record_auth_attempt("login", true);
    metrics::record_session_issued();
    tracing::debug!("Session cookie issued");

    Ok((apply_directive(jar, directive), Json(StatusResponse::success())))
}

/// Clear the session cookie
///
/// POST /api/auth/logout
///
/// Always returns 200 with a clearing Set-Cookie header, whether or not a
/// session existed, so a stale client can always reach the signed-out state.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<StatusResponse>) {
    let directive = state.sessions.revoke();

    metrics::record_auth_attempt("logout", true);
    metrics::record_session_revoked();
    tracing::debug!("Session cookie cleared");

    (apply_directive(jar, directive), Json(StatusResponse::success()))
}
