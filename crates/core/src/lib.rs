#![deny(unsafe_code)]

//! # Inkwell Edge Core
//!
//! Core logic for the Inkwell edge: the access gate policy, the session
//! cookie lifecycle, the credential verifier seam, and the client-side
//! reconciliation layer.
//!
//! ## Imports
//!
//! Import types from their source crates:
//! - Entity types: `inkwell_edge_types::entities`
//! - DTOs: `inkwell_edge_types::dto`
//! - Errors: `inkwell_edge_types::Error`
//! - Config: `inkwell_edge_config::Config`

pub mod gate;
pub mod logging;
pub mod metrics;
pub mod reconcile;
pub mod session;
pub mod startup;
pub mod verifier;

pub use gate::{GateDecision, GatePolicy};
pub use reconcile::{
    AuthStage, HttpSessionClient, Navigator, Reconciler, RenderDecision, SessionChannel,
};
pub use session::{CookieDirective, SameSite, SessionCookieManager};
pub use verifier::{
    CredentialVerifier, HttpCredentialVerifier, IdentityUpdate, StaticCredentialVerifier,
};
