use serde::{Deserialize, Serialize};

/// Request body for `POST /api/auth/login`
///
/// The token is the opaque credential minted by the identity provider during
/// the client-side sign-in; the edge only moves it into a cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Identity token to store in the session cookie
    ///
    /// Defaults to empty when the field is omitted so the handler can answer
    /// with the proper missing-token error instead of a deserializer reject.
    #[serde(default)]
    pub token: String,
}

/// Uniform success body for the auth endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Always `"success"` on the 200 path
    pub status: String,
}

impl StatusResponse {
    /// The standard success body
    pub fn success() -> Self {
        Self { status: "success".to_string() }
    }
}

/// Uniform error body returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}
