//! Startup banner and configuration summary for interactive runs.
//!
//! JSON-mode deployments skip the banner entirely; these helpers are for
//! humans watching a terminal.

/// Identity block at the top of the banner.
pub struct ServiceInfo {
    pub name: &'static str,
    pub subtext: &'static str,
    pub version: &'static str,
    pub environment: String,
}

/// One row of the configuration summary.
pub struct ConfigEntry {
    section: &'static str,
    key: &'static str,
    value: String,
    warning: bool,
}

impl ConfigEntry {
    pub fn new(section: &'static str, key: &'static str, value: impl Into<String>) -> Self {
        Self { section, key, value: value.into(), warning: false }
    }

    /// Row rendered with a warning marker.
    pub fn warning(section: &'static str, key: &'static str, value: impl Into<String>) -> Self {
        Self { section, key, value: value.into(), warning: true }
    }
}

/// Builder for the startup banner.
pub struct StartupDisplay {
    info: ServiceInfo,
    entries: Vec<ConfigEntry>,
}

impl StartupDisplay {
    pub fn new(info: ServiceInfo) -> Self {
        Self { info, entries: Vec::new() }
    }

    pub fn entries(mut self, entries: Vec<ConfigEntry>) -> Self {
        self.entries = entries;
        self
    }

    /// Print the banner to stdout.
    pub fn display(self) {
        println!();
        println!("  {} {} v{}", self.info.name, self.info.subtext, self.info.version);
        println!("  environment: {}", self.info.environment);
        println!();

        let mut last_section = "";
        for entry in &self.entries {
            let section = if entry.section == last_section { "" } else { entry.section };
            last_section = entry.section;
            let marker = if entry.warning { "!" } else { " " };
            println!("  {marker} {section:<10} {:<16} {}", entry.key, entry.value);
        }
        println!();
    }
}

/// Log a component as initialized, in the standard startup style.
pub fn log_initialized(component: &str) {
    tracing::info!(component, "Initialized");
}

/// Log a component as ready to serve traffic.
pub fn log_ready(component: &str) {
    tracing::info!(component, "Ready");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_does_not_panic() {
        StartupDisplay::new(ServiceInfo {
            name: "Inkwell",
            subtext: "Edge",
            version: "0.0.0",
            environment: "test".to_string(),
        })
        .entries(vec![
            ConfigEntry::new("Listen", "HTTP", "127.0.0.1:9080"),
            ConfigEntry::new("Gate", "Protected", "/dashboard"),
            ConfigEntry::warning("Cookie", "Secure", "off"),
        ])
        .display();
    }

    #[test]
    fn test_log_initialized_does_not_panic() {
        log_initialized("Gate");
        log_ready("Edge");
    }
}
