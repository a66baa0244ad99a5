//! Session cookie lifecycle.
//!
//! Converts provider-issued identity tokens into cookie directives on login
//! and expires them on logout. Directives are plain data; the HTTP layer
//! turns them into Set-Cookie headers, so this module stays free of any
//! web-framework types.

use inkwell_edge_const::auth::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME};
use inkwell_edge_types::{
    IdentityToken,
    error::{Error, Result},
};

/// SameSite policy carried by a directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// A cookie mutation for the HTTP layer to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDirective {
    pub name: &'static str,
    pub value: String,
    /// Seconds until expiry; zero or negative expires the cookie now.
    pub max_age: i64,
    pub http_only: bool,
    pub secure: bool,
    pub path: &'static str,
    pub same_site: SameSite,
}

impl CookieDirective {
    /// True when applying this directive removes the session.
    pub fn is_removal(&self) -> bool {
        self.max_age <= 0 && self.value.is_empty()
    }
}

/// Issues and revokes the session cookie.
///
/// The token value is an opaque pass-through: nothing here reads, decodes,
/// or validates it.
#[derive(Debug, Clone)]
pub struct SessionCookieManager {
    secure: bool,
}

impl SessionCookieManager {
    /// `secure` controls the cookie Secure attribute. Production keeps it
    /// on; dev mode over plain HTTP drops it so browsers accept the cookie.
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Directive binding `token` to the browser for one hour.
    ///
    /// Fails with [`Error::MissingToken`] when the token is empty: an
    /// empty cookie would read as "absent" at the gate and the login would
    /// silently not stick.
    pub fn issue(&self, token: &IdentityToken) -> Result<CookieDirective> {
        if token.is_empty() {
            return Err(Error::missing_token());
        }

        Ok(CookieDirective {
            name: SESSION_COOKIE_NAME,
            value: token.as_str().to_string(),
            max_age: SESSION_COOKIE_MAX_AGE,
            http_only: true,
            secure: self.secure,
            path: "/",
            same_site: SameSite::Lax,
        })
    }

    /// Directive that overwrites the session cookie with an immediately
    /// expired empty value.
    ///
    /// Always succeeds, with or without an existing session; repeated calls
    /// yield the same directive.
    pub fn revoke(&self) -> CookieDirective {
        CookieDirective {
            name: SESSION_COOKIE_NAME,
            value: String::new(),
            max_age: 0,
            http_only: true,
            secure: self.secure,
            path: "/",
            same_site: SameSite::Lax,
        }
    }
}
