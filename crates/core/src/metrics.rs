//! Metric descriptions and recording helpers for the edge.
//!
//! Built on the `metrics` facade; the api crate installs the Prometheus
//! recorder and serves the scrape endpoint.

use std::sync::Once;

use metrics::{counter, describe_counter, describe_histogram, histogram};

static DESCRIBE: Once = Once::new();

/// Register metric names and descriptions with the installed recorder.
///
/// Call once at startup, after the recorder is installed. Safe to call
/// again; later calls are no-ops.
pub fn init() {
    DESCRIBE.call_once(|| {
        describe_counter!("http_requests_total", "Total number of HTTP requests received");
        describe_histogram!("http_request_duration_seconds", "HTTP request duration in seconds");

        describe_counter!(
            "gate_decisions_total",
            "Total number of access gate decisions, by outcome"
        );

        describe_counter!("auth_attempts_total", "Total number of authentication attempts");
        describe_counter!(
            "session_cookies_issued_total",
            "Total number of session cookies issued at login"
        );
        describe_counter!(
            "session_cookies_revoked_total",
            "Total number of session cookies cleared at logout"
        );
    });
}

/// Record one completed HTTP request with its latency.
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string(), "status" => status.to_string())
        .increment(1);
    histogram!("http_request_duration_seconds", "method" => method.to_string(), "path" => path.to_string())
        .record(duration_secs);
}

/// Record a gate decision; `outcome` is `"pass"` or `"redirect"`.
pub fn record_gate_decision(outcome: &str) {
    counter!("gate_decisions_total", "outcome" => outcome.to_string()).increment(1);
}

/// Record an auth attempt; `kind` is `"login"` or `"logout"`.
pub fn record_auth_attempt(kind: &str, success: bool) {
    counter!("auth_attempts_total", "kind" => kind.to_string(), "success" => success.to_string())
        .increment(1);
}

/// Record a session cookie issuance.
pub fn record_session_issued() {
    counter!("session_cookies_issued_total").increment(1);
}

/// Record a session cookie revocation.
pub fn record_session_revoked() {
    counter!("session_cookies_revoked_total").increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    // With no recorder installed the macros drop samples; these only prove
    // the helpers never panic.

    #[test]
    fn test_init_is_idempotent() {
        init();
        init();
    }

    #[test]
    fn test_recording_without_a_recorder_is_harmless() {
        init();
        record_http_request("GET", "/livez", 200, 0.001);
        record_http_request("POST", "/api/auth/login", 400, 0.050);
        record_gate_decision("pass");
        record_gate_decision("redirect");
        record_auth_attempt("login", true);
        record_auth_attempt("logout", true);
        record_session_issued();
        record_session_revoked();
    }
}
