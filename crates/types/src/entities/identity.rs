use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque identity token issued by the external authentication provider
///
/// The token is a capability, not a document: this codebase never parses,
/// decodes, or validates its contents. Any claims it may carry (subject,
/// expiry) are read only by the provider and by downstream services.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(String);

impl IdentityToken {
    /// Wrap a raw token string from the provider
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value for cookie and wire use
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no token material is present
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the wrapper, yielding the raw token string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for IdentityToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for IdentityToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

// Token material must not leak into logs or panic output.
impl std::fmt::Debug for IdentityToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IdentityToken({} bytes)", self.0.len())
    }
}

/// Identity attributes the provider exposes once credentials verify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct VerifiedIdentity {
    /// Stable provider-assigned subject identifier
    pub subject: String,

    /// Primary email address, when the provider shares it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Human-readable display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// Outcome of a successful credential check against the provider
///
/// `expires_at` comes from the provider's response envelope, never from
/// decoding the token itself.
#[derive(Debug, Clone)]
pub struct ProviderSession {
    /// Who the provider says this is
    pub identity: VerifiedIdentity,

    /// Token to be carried in the session cookie
    pub token: IdentityToken,

    /// Provider-reported token expiry
    pub expires_at: DateTime<Utc>,
}
