//! Credential verification against the external identity provider.
//!
//! The provider is a collaborator, not part of this system: it owns
//! accounts, passwords, and token minting. This module is the seam, a
//! trait with a REST-backed implementation for the hosted provider and an
//! in-memory implementation for development and tests. The rest of the
//! codebase treats tokens as opaque strings throughout.

use std::{collections::HashMap, sync::Mutex, time::Duration as StdDuration};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use inkwell_edge_const::{auth::SESSION_COOKIE_MAX_AGE, duration::PROVIDER_HTTP_TIMEOUT_SECONDS};
use inkwell_edge_types::{
    IdentityToken, ProviderSession, VerifiedIdentity,
    error::{Error, Result},
};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Latest word from the provider about who is signed in.
///
/// Every firing is a full snapshot, not a delta. The watch channel keeps
/// only the newest value, so slow readers observe last-writer-wins
/// semantics by construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentityUpdate {
    /// No notification yet; the initial check is still in flight.
    #[default]
    Pending,
    /// Definitive snapshot: `Some` when signed in, `None` when signed out.
    Resolved(Option<VerifiedIdentity>),
}

/// Credential verifier abstraction
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Exchange email/password for a verified identity plus an opaque token.
    ///
    /// A definitive rejection (bad credentials, unknown account) surfaces
    /// as [`Error::VerifierRejected`]; transport trouble as
    /// [`Error::External`]. No retries either way.
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession>;

    /// Create an account, returning the fresh identity and token.
    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession>;

    /// Drop the provider-side session state.
    async fn sign_out(&self) -> Result<()>;

    /// Subscribe to identity snapshots.
    fn changes(&self) -> watch::Receiver<IdentityUpdate>;
}

// ============================================================================
// REST implementation
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

/// Success envelope of the provider's token endpoints.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderTokenResponse {
    id_token: String,
    local_id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    photo_url: Option<String>,
    /// Token lifetime in seconds, as a decimal string.
    #[serde(default)]
    expires_in: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

impl ProviderTokenResponse {
    fn into_session(self) -> ProviderSession {
        let identity = VerifiedIdentity::builder()
            .subject(self.local_id)
            .maybe_email(self.email)
            .maybe_display_name(self.display_name)
            .maybe_photo_url(self.photo_url)
            .build();

        // Expiry comes from the envelope, never from decoding the token.
        let ttl = self
            .expires_in
            .as_deref()
            .and_then(|s| s.parse::<i64>().ok())
            .unwrap_or(SESSION_COOKIE_MAX_AGE);

        ProviderSession {
            identity,
            token: IdentityToken::new(self.id_token),
            expires_at: Utc::now() + Duration::seconds(ttl),
        }
    }
}

/// REST client for the hosted identity provider.
///
/// Speaks the provider's account endpoints
/// (`/v1/accounts:signInWithPassword`, `/v1/accounts:signUp`) with the API
/// key as a query parameter. A fresh client has no persisted session, so
/// the identity channel starts out resolved to signed-out.
pub struct HttpCredentialVerifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    updates: watch::Sender<IdentityUpdate>,
}

impl HttpCredentialVerifier {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(PROVIDER_HTTP_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| Error::internal(format!("Failed to build provider HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            updates: watch::Sender::new(IdentityUpdate::Resolved(None)),
        })
    }

    async fn token_request(&self, operation: &str, email: &str, password: &str) -> Result<ProviderSession> {
        let url = format!("{}/v1/{operation}?key={}", self.endpoint, self.api_key);
        let body = CredentialsRequest { email, password, return_secure_token: true };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::external(format!("Identity provider unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ProviderErrorBody>()
                .await
                .map(|b| b.error.message)
                .unwrap_or_else(|_| format!("provider returned HTTP {status}"));
            tracing::warn!(operation, %status, "Identity provider rejected credentials");
            return Err(Error::verifier_rejected(message));
        }

        let body: ProviderTokenResponse = response
            .json()
            .await
            .map_err(|e| Error::external(format!("Malformed provider response: {e}")))?;

        Ok(body.into_session())
    }
}

#[async_trait]
impl CredentialVerifier for HttpCredentialVerifier {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let session = self.token_request("accounts:signInWithPassword", email, password).await?;
        self.updates.send_replace(IdentityUpdate::Resolved(Some(session.identity.clone())));
        tracing::info!(subject = %session.identity.subject, "Provider sign-in succeeded");
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let session = self.token_request("accounts:signUp", email, password).await?;
        self.updates.send_replace(IdentityUpdate::Resolved(Some(session.identity.clone())));
        tracing::info!(subject = %session.identity.subject, "Provider account created");
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        // The password flow holds no server-side session; signing out is a
        // local state change plus the snapshot broadcast.
        self.updates.send_replace(IdentityUpdate::Resolved(None));
        Ok(())
    }

    fn changes(&self) -> watch::Receiver<IdentityUpdate> {
        self.updates.subscribe()
    }
}

// ============================================================================
// In-memory implementation
// ============================================================================

struct StaticAccount {
    password: String,
    identity: VerifiedIdentity,
}

/// In-memory verifier for development and tests.
///
/// Accounts live in a plain map with plaintext passwords; this is a dev
/// fixture, not a password store. Tokens are random 64-hex strings with
/// the same lifetime as the session cookie.
///
/// The identity channel starts out [`IdentityUpdate::Pending`] so callers
/// can exercise the initializing window; [`Self::complete_initial_check`]
/// resolves it, mirroring a provider finishing its startup probe.
pub struct StaticCredentialVerifier {
    accounts: Mutex<HashMap<String, StaticAccount>>,
    current: Mutex<Option<VerifiedIdentity>>,
    updates: watch::Sender<IdentityUpdate>,
}

impl StaticCredentialVerifier {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            current: Mutex::new(None),
            updates: watch::Sender::new(IdentityUpdate::Pending),
        }
    }

    /// Register an account, consuming and returning self for chaining.
    pub fn with_account(self, email: &str, password: &str, identity: VerifiedIdentity) -> Self {
        if let Ok(mut accounts) = self.accounts.lock() {
            accounts.insert(
                email.to_string(),
                StaticAccount { password: password.to_string(), identity },
            );
        }
        self
    }

    /// Publish the current signed-in state, ending the pending window.
    pub fn complete_initial_check(&self) {
        let current = self.current.lock().map(|c| c.clone()).unwrap_or_default();
        self.updates.send_replace(IdentityUpdate::Resolved(current));
    }

    /// Random 64-hex opaque token.
    fn generate_token() -> String {
        use rand::Rng;
        let mut rng = rand::rng();
        let bytes: [u8; 32] = rng.random();
        hex::encode(bytes)
    }

    fn mint_session(&self, identity: VerifiedIdentity) -> ProviderSession {
        if let Ok(mut current) = self.current.lock() {
            *current = Some(identity.clone());
        }
        self.updates.send_replace(IdentityUpdate::Resolved(Some(identity.clone())));

        ProviderSession {
            identity,
            token: IdentityToken::new(Self::generate_token()),
            expires_at: Utc::now() + Duration::seconds(SESSION_COOKIE_MAX_AGE),
        }
    }
}

impl Default for StaticCredentialVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn sign_in(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let identity = {
            let accounts = self
                .accounts
                .lock()
                .map_err(|_| Error::internal("account table poisoned"))?;
            match accounts.get(email) {
                Some(account) if account.password == password => account.identity.clone(),
                _ => return Err(Error::verifier_rejected("invalid email or password")),
            }
        };

        Ok(self.mint_session(identity))
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<ProviderSession> {
        let identity = {
            let mut accounts = self
                .accounts
                .lock()
                .map_err(|_| Error::internal("account table poisoned"))?;
            if accounts.contains_key(email) {
                return Err(Error::verifier_rejected("email already registered"));
            }

            let identity = VerifiedIdentity::builder()
                .subject(format!("user-{}", &Self::generate_token()[..8]))
                .email(email.to_string())
                .build();
            accounts.insert(
                email.to_string(),
                StaticAccount { password: password.to_string(), identity: identity.clone() },
            );
            identity
        };

        Ok(self.mint_session(identity))
    }

    async fn sign_out(&self) -> Result<()> {
        if let Ok(mut current) = self.current.lock() {
            *current = None;
        }
        self.updates.send_replace(IdentityUpdate::Resolved(None));
        Ok(())
    }

    fn changes(&self) -> watch::Receiver<IdentityUpdate> {
        self.updates.subscribe()
    }
}
