//! Access gate decision logic.
//!
//! Every inbound request is answered with PASS or REDIRECT before any
//! handler runs. The decision is a pure function of the request path and
//! session-cookie presence: no I/O, no clock, no cached state. Because
//! nothing is cached there is also nothing to invalidate when the cookie
//! changes; a fresh request always gets a fresh decision.

use inkwell_edge_const::paths;

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Forward the request unchanged.
    Pass,
    /// Send the visitor to the login page, original destination attached.
    Redirect(String),
}

/// Protected-path policy for the edge.
///
/// Prefixes match at segment boundaries: `/dashboard` protects
/// `/dashboard` and `/dashboard/settings` but not `/dashboardia`.
/// Unlisted paths always pass (fail-open).
#[derive(Debug, Clone)]
pub struct GatePolicy {
    prefixes: Vec<String>,
    login_path: String,
}

impl GatePolicy {
    pub fn new(prefixes: Vec<String>, login_path: impl Into<String>) -> Self {
        Self { prefixes, login_path: login_path.into() }
    }

    /// True when `path` sits under one of the protected prefixes.
    pub fn is_protected(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| {
            path == prefix
                || path.strip_prefix(prefix.as_str()).is_some_and(|rest| rest.starts_with('/'))
        })
    }

    /// Decide PASS or REDIRECT for one request.
    ///
    /// Presence only: any non-empty cookie value passes, expired and forged
    /// ones included. Validity is the business of whatever reads the token
    /// downstream; the gate is a cheap first fence, not a validator.
    pub fn decide(&self, path: &str, session_present: bool) -> GateDecision {
        if self.is_protected(path) && !session_present {
            GateDecision::Redirect(self.login_redirect(path))
        } else {
            GateDecision::Pass
        }
    }

    /// Login location carrying the original destination.
    ///
    /// Only the path travels in the `redirect` parameter; query strings of
    /// the original request are dropped.
    pub fn login_redirect(&self, original_path: &str) -> String {
        format!(
            "{}?{}={}",
            self.login_path,
            paths::REDIRECT_PARAM,
            urlencoding::encode(original_path)
        )
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::new(
            paths::PROTECTED_PATH_PREFIXES.iter().map(|p| (*p).to_string()).collect(),
            paths::LOGIN_PATH,
        )
    }
}
