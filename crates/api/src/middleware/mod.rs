pub mod gate;
pub mod logging;

pub use gate::session_gate;
pub use logging::logging_middleware;
