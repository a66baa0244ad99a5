//! # Inkwell Edge Configuration
//!
//! CLI-first configuration for the edge service. Uses `clap::Parser` for
//! argument parsing with environment variable fallbacks, and `bon::Builder`
//! for ergonomic test construction without CLI/env interference.
//!
//! ```no_run
//! use inkwell_edge_config::{Cli, Config};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! let config = cli.config;
//! config.validate().expect("invalid configuration");
//! ```
//!
//! ```no_run
//! use inkwell_edge_config::Config;
//!
//! let config = Config::builder()
//!     .protected_paths(vec!["/dashboard".to_string(), "/drafts".to_string()])
//!     .dev_mode(true)
//!     .build();
//! ```

#![deny(unsafe_code)]

use std::net::SocketAddr;

use bon::Builder;
use clap::Parser;
use inkwell_edge_const::paths;
use inkwell_edge_types::error::{Error, Result};

/// Default HTTP bind address.
const DEFAULT_LISTEN: &str = "127.0.0.1:9080";

/// Default log level filter string.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// Automatically detect: JSON for non-TTY stdout, text otherwise.
    #[default]
    Auto,
    /// JSON structured logging (recommended for production).
    Json,
    /// Human-readable text format.
    Text,
}

/// Command-line interface for the Inkwell edge service.
#[derive(Debug, Parser)]
#[command(name = "inkwell-edge")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If omitted, starts the server.
    #[command(subcommand)]
    pub command: Option<CliCommand>,

    /// Server configuration (flattened so flags appear at top level).
    #[command(flatten)]
    pub config: Config,
}

/// CLI subcommands.
#[derive(Debug, clap::Subcommand)]
pub enum CliCommand {}

/// Configuration for the Inkwell edge service.
///
/// All fields are configurable via CLI flags or environment variables.
/// Precedence: CLI arg > env var > default value.
#[derive(Debug, Clone, Builder, Parser)]
#[command(name = "inkwell-edge")]
#[command(version)]
#[builder(on(String, into))]
pub struct Config {
    // ── Server ───────────────────────────────────────────────────────
    /// HTTP bind address.
    #[arg(long = "listen", env = "INKWELL__EDGE__LISTEN", default_value = DEFAULT_LISTEN)]
    #[builder(default = default_listen())]
    pub listen: SocketAddr,

    /// Tracing-subscriber filter string (e.g., info, debug, trace).
    #[arg(long = "log-level", env = "INKWELL__EDGE__LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    #[builder(default = DEFAULT_LOG_LEVEL.to_string())]
    pub log_level: String,

    /// Log output format: auto, json, or text.
    #[arg(
        long = "log-format",
        env = "INKWELL__EDGE__LOG_FORMAT",
        value_enum,
        default_value = "auto"
    )]
    #[builder(default)]
    pub log_format: LogFormat,

    // ── Access Gate ──────────────────────────────────────────────────
    /// Path prefixes requiring an authenticated session. Repeatable;
    /// the environment variable takes a comma-separated list.
    #[arg(
        long = "protected-path",
        env = "INKWELL__EDGE__PROTECTED_PATHS",
        value_delimiter = ',',
        default_value = "/dashboard"
    )]
    #[builder(default = default_protected_paths())]
    pub protected_paths: Vec<String>,

    /// Where the gate redirects unauthenticated visitors of protected paths.
    #[arg(long = "login-path", env = "INKWELL__EDGE__LOGIN_PATH", default_value = paths::LOGIN_PATH)]
    #[builder(default = paths::LOGIN_PATH.to_string())]
    pub login_path: String,

    // ── Session Cookie ───────────────────────────────────────────────
    /// Allow the session cookie over plain HTTP (drops the Secure
    /// attribute). Only for local development behind no TLS.
    #[arg(long = "cookie-insecure", env = "INKWELL__EDGE__COOKIE_INSECURE")]
    #[builder(default)]
    pub cookie_insecure: bool,

    // ── Mode Flags ───────────────────────────────────────────────────
    /// Force development mode: implies insecure cookies.
    /// No environment variable — this must be an explicit CLI choice.
    #[arg(long = "dev-mode")]
    #[builder(default)]
    pub dev_mode: bool,
}

fn default_listen() -> SocketAddr {
    #[allow(clippy::expect_used)]
    DEFAULT_LISTEN.parse().expect("valid default listen address")
}

fn default_protected_paths() -> Vec<String> {
    paths::PROTECTED_PATH_PREFIXES.iter().map(|p| (*p).to_string()).collect()
}

impl Config {
    /// Validate cross-field business rules.
    ///
    /// Must be called after parsing and before using the config. Checks
    /// path shapes and guards against a gate that redirects into itself.
    pub fn validate(&self) -> Result<()> {
        if self.protected_paths.is_empty() {
            return Err(Error::config("at least one --protected-path is required"));
        }

        for prefix in &self.protected_paths {
            if !prefix.starts_with('/') {
                return Err(Error::config(format!(
                    "--protected-path entries must start with '/', got: {prefix}"
                )));
            }
            if prefix.len() == 1 {
                return Err(Error::config(
                    "--protected-path must not be '/' (every page would require login)",
                ));
            }
            if prefix.len() > 1 && prefix.ends_with('/') {
                return Err(Error::config(format!(
                    "--protected-path entries must not end with '/', got: {prefix}"
                )));
            }
        }

        if !self.login_path.starts_with('/') {
            return Err(Error::config("--login-path must start with '/'"));
        }

        // A protected login page would redirect to itself forever.
        for prefix in &self.protected_paths {
            if self.login_path == *prefix
                || self.login_path.starts_with(&format!("{prefix}/"))
            {
                return Err(Error::config(format!(
                    "--login-path {} is inside protected prefix {prefix}",
                    self.login_path
                )));
            }
        }

        if self.cookie_insecure && !self.dev_mode {
            tracing::warn!(
                "--cookie-insecure set outside dev mode: session cookie will travel over plain HTTP"
            );
        }

        Ok(())
    }

    /// Returns whether issued cookies carry the Secure attribute.
    ///
    /// Secure is dropped in dev mode or when `--cookie-insecure` is set;
    /// production keeps it on.
    pub fn cookie_secure(&self) -> bool {
        !(self.cookie_insecure || self.dev_mode)
    }

    /// Returns whether dev-mode is enabled.
    pub fn is_dev_mode(&self) -> bool {
        self.dev_mode
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    // ── Default Values ───────────────────────────────────────────────

    #[test]
    fn defaults_match_expected_values() {
        let config = Config::builder().build();

        assert_eq!(config.listen, "127.0.0.1:9080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Auto);
        assert_eq!(config.protected_paths, vec!["/dashboard".to_string()]);
        assert_eq!(config.login_path, "/login");
        assert!(!config.cookie_insecure);
        assert!(!config.dev_mode);
    }

    #[test]
    fn default_config_validates() {
        assert!(Config::builder().build().validate().is_ok());
    }

    // ── Validation: Protected Paths ──────────────────────────────────

    #[test]
    fn validate_rejects_empty_protected_paths() {
        let config = Config::builder().protected_paths(vec![]).build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least one --protected-path"));
    }

    #[test]
    fn validate_rejects_relative_protected_path() {
        let config = Config::builder().protected_paths(vec!["dashboard".to_string()]).build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must start with '/'"));
    }

    #[test]
    fn validate_rejects_root_as_protected_path() {
        let config = Config::builder().protected_paths(vec!["/".to_string()]).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_trailing_slash_prefix() {
        let config = Config::builder().protected_paths(vec!["/dashboard/".to_string()]).build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must not end with '/'"));
    }

    #[test]
    fn validate_passes_multiple_protected_paths() {
        let config = Config::builder()
            .protected_paths(vec!["/dashboard".to_string(), "/drafts".to_string()])
            .build();
        assert!(config.validate().is_ok());
    }

    // ── Validation: Login Path ───────────────────────────────────────

    #[test]
    fn validate_rejects_relative_login_path() {
        let config = Config::builder().login_path("login").build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("--login-path must start with '/'"));
    }

    #[test]
    fn validate_rejects_protected_login_path() {
        let config = Config::builder().login_path("/dashboard/login").build();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("inside protected prefix"));
    }

    #[test]
    fn validate_rejects_login_path_equal_to_prefix() {
        let config = Config::builder()
            .protected_paths(vec!["/login".to_string()])
            .build();
        assert!(config.validate().is_err());
    }

    // ── Helper Methods ───────────────────────────────────────────────

    #[test]
    fn cookie_secure_by_default() {
        let config = Config::builder().build();
        assert!(config.cookie_secure());
    }

    #[test]
    fn cookie_insecure_flag_disables_secure() {
        let config = Config::builder().cookie_insecure(true).build();
        assert!(!config.cookie_secure());
    }

    #[test]
    fn dev_mode_disables_secure() {
        let config = Config::builder().dev_mode(true).build();
        assert!(!config.cookie_secure());
        assert!(config.is_dev_mode());
    }

    // ── CLI Parsing ──────────────────────────────────────────────────

    #[test]
    fn cli_parse_dev_mode() {
        let cli = Cli::try_parse_from(["test", "--dev-mode"]).unwrap();
        assert!(cli.config.dev_mode);
    }

    #[test]
    fn cli_parse_listen_address() {
        let cli = Cli::try_parse_from(["test", "--listen", "0.0.0.0:8080"]).unwrap();
        assert_eq!(cli.config.listen, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn cli_parse_log_format_json() {
        let cli = Cli::try_parse_from(["test", "--log-format", "json"]).unwrap();
        assert_eq!(cli.config.log_format, LogFormat::Json);
    }

    #[test]
    fn cli_parse_log_format_text() {
        let cli = Cli::try_parse_from(["test", "--log-format", "text"]).unwrap();
        assert_eq!(cli.config.log_format, LogFormat::Text);
    }

    #[test]
    fn cli_parse_repeated_protected_paths() {
        let cli = Cli::try_parse_from([
            "test",
            "--protected-path",
            "/dashboard",
            "--protected-path",
            "/drafts",
        ])
        .unwrap();
        assert_eq!(
            cli.config.protected_paths,
            vec!["/dashboard".to_string(), "/drafts".to_string()]
        );
    }

    #[test]
    fn cli_parse_comma_separated_protected_paths() {
        let cli =
            Cli::try_parse_from(["test", "--protected-path", "/dashboard,/drafts"]).unwrap();
        assert_eq!(
            cli.config.protected_paths,
            vec!["/dashboard".to_string(), "/drafts".to_string()]
        );
    }

    #[test]
    fn cli_parse_login_path() {
        let cli = Cli::try_parse_from(["test", "--login-path", "/signin"]).unwrap();
        assert_eq!(cli.config.login_path, "/signin");
    }

    #[test]
    fn cli_parse_cookie_insecure() {
        let cli = Cli::try_parse_from(["test", "--cookie-insecure"]).unwrap();
        assert!(cli.config.cookie_insecure);
    }

    #[test]
    fn cli_rejects_invalid_log_format() {
        let result = Cli::try_parse_from(["test", "--log-format", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_rejects_unknown_flags() {
        let result = Cli::try_parse_from(["test", "--config", "foo.yaml"]);
        assert!(result.is_err());
    }

    // ── Enum Display ─────────────────────────────────────────────────

    #[test]
    fn log_format_display() {
        assert_eq!(LogFormat::Auto.to_string(), "auto");
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Text.to_string(), "text");
    }
}
