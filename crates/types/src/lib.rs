//! # Inkwell Edge Types
//!
//! Shared type definitions for the Inkwell edge service.
//!
//! This crate provides the types used across the edge ecosystem, ensuring a
//! single source of truth and preventing circular dependencies.
//!
//! ## Imports
//!
//! Import types from their source modules:
//! - Entity types: `inkwell_edge_types::entities`
//! - DTOs: `inkwell_edge_types::dto`
//! - Errors: `inkwell_edge_types::Error`

#![deny(unsafe_code)]

// ============================================================================
// Error Types
// ============================================================================

pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Entity Types
// ============================================================================

pub mod entities;

pub use entities::{IdentityToken, ProviderSession, VerifiedIdentity};

// ============================================================================
// Request/Response Types
// ============================================================================

pub mod dto;

pub use dto::{ErrorResponse, LoginRequest, StatusResponse};
