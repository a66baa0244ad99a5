use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use inkwell_edge_config::{Cli, LogFormat};
use inkwell_edge_core::{logging, metrics, startup};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config;

    // Interactive text runs get a clean screen before the banner
    if config.log_format != LogFormat::Json && std::io::IsTerminal::is_terminal(&std::io::stdout())
    {
        print!("\x1B[2J\x1B[1;1H");
    }

    config.validate()?;

    // Logging first; everything after this point traces
    let log_config = logging::LogConfig {
        format: match config.log_format {
            LogFormat::Json => logging::LogFormat::Json,
            LogFormat::Text => logging::LogFormat::Full,
            LogFormat::Auto => {
                if std::io::IsTerminal::is_terminal(&std::io::stdout()) {
                    logging::LogFormat::Full
                } else {
                    logging::LogFormat::Json
                }
            },
        },
        filter: Some(config.log_level.clone()),
        ..Default::default()
    };

    if let Err(e) = logging::init_logging(log_config) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    if config.is_dev_mode() {
        tracing::info!(
            "Development mode enabled via --dev-mode flag: session cookies sent without Secure"
        );
    }

    // Banner for humans, a single structured line for aggregators
    if config.log_format != LogFormat::Json {
        let cookie_entry = if config.cookie_secure() {
            startup::ConfigEntry::new("Cookie", "Secure", "on")
        } else {
            startup::ConfigEntry::warning("Cookie", "Secure", "off (plain HTTP)")
        };

        startup::StartupDisplay::new(startup::ServiceInfo {
            name: "Inkwell",
            subtext: "Edge",
            version: env!("CARGO_PKG_VERSION"),
            environment: if config.is_dev_mode() {
                "development".to_string()
            } else {
                "production".to_string()
            },
        })
        .entries(vec![
            startup::ConfigEntry::new("Listen", "HTTP", config.listen.to_string()),
            startup::ConfigEntry::new("Gate", "Protected", config.protected_paths.join(", ")),
            startup::ConfigEntry::new("Gate", "Login", config.login_path.clone()),
            cookie_entry,
        ])
        .display();
    } else {
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting Inkwell Edge");
    }

    // Install the Prometheus recorder before the first sample is recorded
    inkwell_edge_api::init_exporter()?;
    metrics::init();
    startup::log_initialized("Metrics");

    // Shared ownership across the router and handlers
    let config = Arc::new(config);

    inkwell_edge_api::serve(config).await?;

    tracing::info!("Shutting down gracefully");
    Ok(())
}
