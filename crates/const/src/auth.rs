//! Authentication constants for session cookie management.

/// Session cookie name used for user authentication.
///
/// This cookie carries the provider-issued identity token for authenticated
/// users. Must be consistent across the gate, the auth handlers, and the
/// client library: the gate checks presence under this exact name.
pub const SESSION_COOKIE_NAME: &str = "inkwell_id_token";

/// Session cookie maximum age in seconds (1 hour).
///
/// After this duration, the session cookie expires and users must
/// re-authenticate. There is no refresh flow; expiry is a hard cutoff.
pub const SESSION_COOKIE_MAX_AGE: i64 = 60 * 60;
