//! Request/response bodies for the edge HTTP surface

pub mod auth;

pub use auth::{ErrorResponse, LoginRequest, StatusResponse};
