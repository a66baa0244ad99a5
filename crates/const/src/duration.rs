//! Timeout and duration constants.

/// How long the reconciler waits for the provider's first identity
/// notification before giving up (seconds).
///
/// A provider that never reports would otherwise pin the client in the
/// initializing state forever; on timeout the reconciler settles on
/// unauthenticated and lets the gate sort the rest out.
pub const IDENTITY_RESOLVE_TIMEOUT_SECONDS: u64 = 10;

/// Per-request timeout for outbound provider HTTP calls (seconds).
pub const PROVIDER_HTTP_TIMEOUT_SECONDS: u64 = 10;
