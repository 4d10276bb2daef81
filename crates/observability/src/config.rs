//! Configuration for logging/telemetry

use serde::{Deserialize, Serialize};

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name included in log lines (e.g., "taskdeck", "taskdeck-sync")
    pub service_name: String,

    /// Service version (optional, defaults to "unknown")
    pub service_version: Option<String>,

    /// Enable console output
    #[serde(default = "default_true")]
    pub enable_console: bool,

    /// Log level filter (e.g., "info", "debug", "taskdeck_engine=trace")
    /// Defaults to "info" if not set
    pub log_level: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "taskdeck".to_string(),
            service_version: None,
            enable_console: true,
            log_level: None,
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `TASKDECK_SERVICE_NAME` → service_name
    /// - `TASKDECK_SERVICE_VERSION` → service_version
    /// - `TASKDECK_LOG` or `RUST_LOG` → log_level
    pub fn from_env() -> Self {
        let service_name =
            std::env::var("TASKDECK_SERVICE_NAME").unwrap_or_else(|_| "taskdeck".to_string());

        let service_version = std::env::var("TASKDECK_SERVICE_VERSION").ok();

        let log_level = std::env::var("TASKDECK_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok();

        Self {
            service_name,
            service_version,
            enable_console: true,
            log_level,
        }
    }
}
