//! # Inkwell Edge Constants
//!
//! Zero-dependency crate containing constants used across the edge codebase.
//!
//! This crate centralizes:
//! - Authentication constants (session cookie name and lifetime)
//! - Path constants (protected prefixes, login/redirect locations)
//! - Timeout constants (identity resolution, provider HTTP calls)

pub mod auth;
pub mod duration;
pub mod paths;

// Re-export commonly used constants at crate root
pub use auth::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
pub use duration::{IDENTITY_RESOLVE_TIMEOUT_SECONDS, PROVIDER_HTTP_TIMEOUT_SECONDS};
pub use paths::{
    DEFAULT_POST_LOGIN_PATH, HOME_PATH, LOGIN_PATH, PROTECTED_PATH_PREFIXES, REDIRECT_PARAM,
};
