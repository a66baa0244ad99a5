use std::backtrace::Backtrace;

use snafu::Snafu;

/// Result type alias for edge operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the Inkwell edge service
///
/// All variants include backtraces for debugging. Use the constructor methods
/// (e.g., `Error::missing_token()`) to create errors.
///
/// A missing session cookie on a protected path is NOT an error: the access
/// gate answers it with a redirect, never with an error payload. Likewise a
/// never-arriving identity notification on the client resolves through the
/// reconciler's timeout, not through this enum.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Configuration errors
    #[snafu(display("Configuration error: {message}"))]
    Config { message: String, backtrace: Backtrace },

    /// Login was attempted without an identity token. The display text is
    /// the wire-visible message of the 400 response.
    #[snafu(display("Token is required"))]
    MissingToken { backtrace: Backtrace },

    /// The external identity provider rejected the credentials. Definitive
    /// refusal, never retried; transport trouble is `External` instead.
    #[snafu(display("Authentication failed: {message}"))]
    VerifierRejected { message: String, backtrace: Backtrace },

    /// Validation errors
    #[snafu(display("Validation error: {message}"))]
    Validation { message: String, backtrace: Backtrace },

    /// An external collaborator (identity provider, session endpoint) was
    /// unreachable or answered garbage
    #[snafu(display("External service error: {message}"))]
    External { message: String, backtrace: Backtrace },

    /// Internal system errors
    #[snafu(display("Internal error: {message}"))]
    Internal { message: String, backtrace: Backtrace },
}

impl Error {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        ConfigSnafu { message: message.into() }.build()
    }

    /// Create a missing token error
    pub fn missing_token() -> Self {
        MissingTokenSnafu.build()
    }

    /// Create a verifier rejection error
    pub fn verifier_rejected(message: impl Into<String>) -> Self {
        VerifierRejectedSnafu { message: message.into() }.build()
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ValidationSnafu { message: message.into() }.build()
    }

    /// Create an external service error
    pub fn external(message: impl Into<String>) -> Self {
        ExternalSnafu { message: message.into() }.build()
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        InternalSnafu { message: message.into() }.build()
    }

    // =========================================================================
    // Metadata accessors
    // =========================================================================

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Config { .. } => 500,
            Error::MissingToken { .. } => 400,
            Error::VerifierRejected { .. } => 401,
            Error::Validation { .. } => 400,
            Error::External { .. } => 502,
            Error::Internal { .. } => 500,
        }
    }

    /// Get error code for client consumption
    pub fn error_code(&self) -> &str {
        match self {
            Error::Config { .. } => "CONFIGURATION_ERROR",
            Error::MissingToken { .. } => "MISSING_TOKEN",
            Error::VerifierRejected { .. } => "AUTHENTICATION_FAILED",
            Error::Validation { .. } => "VALIDATION_ERROR",
            Error::External { .. } => "EXTERNAL_SERVICE_ERROR",
            Error::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_maps_to_400_with_wire_message() {
        let err = Error::missing_token();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "MISSING_TOKEN");
        // This exact string is the login endpoint's 400 body.
        assert_eq!(err.to_string(), "Token is required");
    }

    #[test]
    fn test_verifier_rejection_maps_to_401() {
        let err = Error::verifier_rejected("INVALID_PASSWORD");
        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "AUTHENTICATION_FAILED");
        assert_eq!(err.to_string(), "Authentication failed: INVALID_PASSWORD");
    }

    #[test]
    fn test_infrastructure_errors_map_to_5xx() {
        assert_eq!(Error::config("bad flag").status_code(), 500);
        assert_eq!(Error::internal("broken").status_code(), 500);
        assert_eq!(Error::external("provider down").status_code(), 502);
    }
}
