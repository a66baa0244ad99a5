//! Client-side reconciliation of provider identity state.
//!
//! A client embeds one [`Reconciler`]: it consumes identity notifications
//! from the credential verifier and publishes an [`AuthStage`] through a
//! watch channel, one writer (the run loop) and any number of readers
//! (views). Readers always observe the newest snapshot; there is no
//! polling and no global mutable state.
//!
//! The reconciler also runs the login/logout/sign-up flows, which are the
//! only places that touch the session endpoints and the navigator.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use inkwell_edge_const::{
    duration::{IDENTITY_RESOLVE_TIMEOUT_SECONDS, PROVIDER_HTTP_TIMEOUT_SECONDS},
    paths::{DEFAULT_POST_LOGIN_PATH, HOME_PATH},
};
use inkwell_edge_types::{
    IdentityToken, LoginRequest, VerifiedIdentity,
    error::{Error, Result},
};
use tokio::sync::watch;

use crate::verifier::{CredentialVerifier, IdentityUpdate};

/// Authentication stage mirrored on the client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStage {
    /// The provider has not reported yet; identity is unknown.
    #[default]
    Initializing,
    /// The provider confirmed a signed-in user.
    Authenticated(VerifiedIdentity),
    /// The provider confirmed nobody is signed in.
    Unauthenticated,
}

/// What an identity-dependent view should do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDecision {
    /// Identity still unknown; show the loading placeholder.
    Placeholder,
    /// Render the real content.
    Content,
    /// Client-side fallback: send the visitor to the login page.
    RedirectToLogin,
}

impl AuthStage {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, AuthStage::Initializing)
    }

    pub fn identity(&self) -> Option<&VerifiedIdentity> {
        match self {
            AuthStage::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    /// Decision for views that merely adapt to identity, like the header.
    ///
    /// Rendering nothing during initialization avoids the flash of
    /// logged-out chrome for a user who is actually signed in.
    pub fn shell_view(&self) -> RenderDecision {
        match self {
            AuthStage::Initializing => RenderDecision::Placeholder,
            _ => RenderDecision::Content,
        }
    }

    /// Decision for views inside a protected area.
    ///
    /// The server gate already guards these paths on cookie presence; this
    /// is the client-side backstop that catches sessions the gate let
    /// through on a stale cookie. It must never redirect before the check
    /// resolves; that would race the provider and bounce signed-in users.
    pub fn protected_view(&self) -> RenderDecision {
        match self {
            AuthStage::Initializing => RenderDecision::Placeholder,
            AuthStage::Authenticated(_) => RenderDecision::Content,
            AuthStage::Unauthenticated => RenderDecision::RedirectToLogin,
        }
    }
}

/// Navigation sink for the flows.
///
/// `assign` must be a full page load: cookie mutations only reach the
/// access gate through a fresh request, so anything less would leave the
/// edge looking at stale state. `push` stays inside the client router.
pub trait Navigator: Send + Sync {
    /// Hard navigation (full page load).
    fn assign(&self, destination: &str);

    /// Soft client-side route change.
    fn push(&self, destination: &str);
}

/// Transport to the edge session endpoints.
#[async_trait]
pub trait SessionChannel: Send + Sync {
    /// POST the token to the login endpoint; the response binds the cookie.
    async fn issue(&self, token: &IdentityToken) -> Result<()>;

    /// POST to the logout endpoint; the response clears the cookie.
    async fn revoke(&self) -> Result<()>;
}

/// HTTP client for the session endpoints, with a cookie store.
///
/// Holding the cookie jar is the point: the jar plays the browser's role
/// so that subsequent requests through this client carry the session.
pub struct HttpSessionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSessionClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(PROVIDER_HTTP_TIMEOUT_SECONDS))
            .build()
            .map_err(|e| Error::internal(format!("Failed to build session HTTP client: {e}")))?;

        Ok(Self { client, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    /// The underlying client, for callers that follow up with page
    /// requests carrying the freshly bound cookie.
    pub fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SessionChannel for HttpSessionClient {
    async fn issue(&self, token: &IdentityToken) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&LoginRequest { token: token.as_str().to_string() })
            .send()
            .await
            .map_err(|e| Error::external(format!("Login endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::external(format!("Login endpoint returned HTTP {status}")));
        }
        Ok(())
    }

    async fn revoke(&self) -> Result<()> {
        let response = self
            .client
            .post(format!("{}/api/auth/logout", self.base_url))
            .send()
            .await
            .map_err(|e| Error::external(format!("Logout endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::external(format!("Logout endpoint returned HTTP {status}")));
        }
        Ok(())
    }
}

/// Post-login destination: the `redirect` parameter when it names a local
/// path, the dashboard otherwise. `//host` forms are protocol-relative
/// URLs and do not count as local.
fn post_login_destination(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => DEFAULT_POST_LOGIN_PATH,
    }
}

/// Drives the auth stage from provider notifications and runs the
/// authentication flows.
pub struct Reconciler {
    verifier: Arc<dyn CredentialVerifier>,
    session: Arc<dyn SessionChannel>,
    navigator: Arc<dyn Navigator>,
    stage: watch::Sender<AuthStage>,
    resolve_timeout: Duration,
}

impl Reconciler {
    pub fn new(
        verifier: Arc<dyn CredentialVerifier>,
        session: Arc<dyn SessionChannel>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            verifier,
            session,
            navigator,
            stage: watch::Sender::new(AuthStage::Initializing),
            resolve_timeout: Duration::from_secs(IDENTITY_RESOLVE_TIMEOUT_SECONDS),
        }
    }

    /// Override the first-notification timeout. Tests use short windows.
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    /// Subscribe to stage snapshots. Any number of readers may hold one.
    pub fn subscribe(&self) -> watch::Receiver<AuthStage> {
        self.stage.subscribe()
    }

    /// Current snapshot without subscribing.
    pub fn current_stage(&self) -> AuthStage {
        self.stage.borrow().clone()
    }

    /// Consume provider notifications until the provider goes away.
    ///
    /// Spawn exactly once per client; this loop is the single writer of
    /// the stage channel. The first resolution is bounded by the resolve
    /// timeout: a provider that never reports leaves the user signed out
    /// rather than staring at a placeholder forever. A notification that
    /// arrives after the timeout still applies, last writer wins.
    pub async fn run(&self) {
        let mut updates = self.verifier.changes();

        let initial = updates.borrow_and_update().clone();
        match initial {
            IdentityUpdate::Resolved(identity) => self.apply(identity),
            IdentityUpdate::Pending => {
                match tokio::time::timeout(self.resolve_timeout, updates.changed()).await {
                    Ok(Ok(())) => {
                        if let IdentityUpdate::Resolved(identity) =
                            updates.borrow_and_update().clone()
                        {
                            self.apply(identity);
                        }
                    },
                    Ok(Err(_)) => {
                        // Provider dropped before ever resolving.
                        self.stage.send_replace(AuthStage::Unauthenticated);
                        return;
                    },
                    Err(_) => {
                        tracing::warn!(
                            timeout_secs = self.resolve_timeout.as_secs(),
                            "Identity check never resolved; treating the session as signed out"
                        );
                        self.apply(None);
                    },
                }
            },
        }

        while updates.changed().await.is_ok() {
            if let IdentityUpdate::Resolved(identity) = updates.borrow_and_update().clone() {
                self.apply(identity);
            }
        }
    }

    fn apply(&self, identity: Option<VerifiedIdentity>) {
        let next = match identity {
            Some(identity) => {
                tracing::debug!(subject = %identity.subject, "Auth stage: authenticated");
                AuthStage::Authenticated(identity)
            },
            None => {
                tracing::debug!("Auth stage: unauthenticated");
                AuthStage::Unauthenticated
            },
        };
        self.stage.send_replace(next);
    }

    /// Sign-in flow: verify credentials, bind the session cookie, then
    /// hard-navigate to `return_to` (the login page's `redirect` query
    /// parameter) or the dashboard.
    ///
    /// The hard navigation is deliberate: the next gate evaluation must
    /// see the cookie the login response just set.
    pub async fn login(&self, email: &str, password: &str, return_to: Option<&str>) -> Result<()> {
        let session = self.verifier.sign_in(email, password).await?;
        self.session.issue(&session.token).await?;
        tracing::info!(subject = %session.identity.subject, "Signed in");
        self.navigator.assign(post_login_destination(return_to));
        Ok(())
    }

    /// Sign-out flow: drop provider state, clear the cookie, go home hard.
    pub async fn logout(&self) -> Result<()> {
        self.verifier.sign_out().await?;
        self.session.revoke().await?;
        tracing::info!("Signed out");
        self.navigator.assign(HOME_PATH);
        Ok(())
    }

    /// Account-creation flow: register with the provider, then route the
    /// client to the dashboard without touching the session cookie.
    ///
    /// Matches the product's current behavior: sign-up leaves cookie
    /// binding to the first explicit login, and the soft navigation keeps
    /// the gate out of the picture until the next full page load.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let session = self.verifier.sign_up(email, password).await?;
        tracing::info!(subject = %session.identity.subject, "Account created");
        self.navigator.push(DEFAULT_POST_LOGIN_PATH);
        Ok(())
    }
}
