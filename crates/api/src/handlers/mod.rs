pub mod auth;
pub mod health;
pub mod metrics;

pub use auth::{ApiError, AppState, login, logout};
pub use health::{healthz_handler, livez_handler, readyz_handler, startupz_handler};
pub use metrics::{init_exporter, metrics_handler};
