//! Entity types shared across the edge service and its client library

pub mod identity;

pub use identity::{IdentityToken, ProviderSession, VerifiedIdentity};
