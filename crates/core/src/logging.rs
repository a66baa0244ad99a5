//! Structured logging for the edge service.
//!
//! The binary picks one of two formats at startup: single-line text when a
//! human is watching the terminal, JSON lines when the output feeds a log
//! aggregator. Filtering goes through `tracing-subscriber`'s env-filter
//! syntax either way.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Single-line text for interactive runs.
    #[default]
    Full,
    /// JSON lines for production log aggregation.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Output format.
    pub format: LogFormat,
    /// Filter directives, e.g. `info` or `info,inkwell_edge=debug`.
    /// `None` reads `RUST_LOG`, with an info-level default.
    pub filter: Option<String>,
    /// ANSI colors in text mode; `None` auto-detects from the stdout TTY.
    pub ansi: Option<bool>,
}

/// Install the global tracing subscriber.
///
/// Call once at startup, before the first log line. Fails when the filter
/// string does not parse or a subscriber is already installed.
///
/// ```no_run
/// use inkwell_edge_core::logging::{LogConfig, LogFormat, init_logging};
///
/// init_logging(LogConfig {
///     format: LogFormat::Json,
///     filter: Some("info".to_string()),
///     ..Default::default()
/// })
/// .unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = match &config.filter {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,inkwell_edge=debug")),
    };

    match config.format {
        LogFormat::Full => {
            let ansi = config.ansi.unwrap_or_else(|| std::io::stdout().is_terminal());
            let layer = fmt::layer().with_ansi(ansi).with_target(false).with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        },
        LogFormat::Json => {
            // Aggregators filter on the target module, so JSON keeps it.
            let layer = fmt::layer()
                .json()
                .with_target(true)
                .with_current_span(true)
                .with_filter(filter);
            tracing_subscriber::registry().with(layer).try_init()?;
        },
    }

    tracing::debug!(format = ?config.format, "Logging initialized");
    Ok(())
}
