//! Path constants for gate routing and post-auth navigation.

/// Default protected path prefixes.
///
/// Requests matching one of these prefixes (exactly, or at a `/` segment
/// boundary) require an authenticated session. Everything else bypasses the
/// gate decision entirely.
pub const PROTECTED_PATH_PREFIXES: &[&str] = &["/dashboard"];

/// Where the gate sends unauthenticated visitors of protected paths.
pub const LOGIN_PATH: &str = "/login";

/// Query parameter carrying the original destination through the login flow.
pub const REDIRECT_PARAM: &str = "redirect";

/// Destination after login when no `redirect` parameter is present.
pub const DEFAULT_POST_LOGIN_PATH: &str = "/dashboard";

/// Destination after logout.
pub const HOME_PATH: &str = "/";
