//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for log output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Component identifier, e.g. `exception-control`
    pub component: String,

    /// Log level filter (trace, debug, info, warn, error) or a full
    /// `EnvFilter` directive
    pub log_level: String,

    /// Whether to write logs to stdout
    pub console_output: bool,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "interlock".to_string(),
            component: String::new(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OTEL_SERVICE_NAME`: Service name (default: interlock)
    /// - `IL_COMPONENT`: Component identifier (default: empty)
    /// - `IL_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `IL_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `IL_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok(), Self::default())
    }

    /// Configuration for tests: debug level, console output off unless the
    /// environment asks for it.
    pub fn for_testing() -> Self {
        let defaults = Self {
            log_level: "debug".to_string(),
            console_output: false,
            ..Self::default()
        };
        Self::from_lookup(|key| env::var(key).ok(), defaults)
    }

    /// Service name including the component, if any.
    pub fn full_service_name(&self) -> String {
        if self.component.is_empty() {
            self.service_name.clone()
        } else {
            format!("{}-{}", self.service_name, self.component)
        }
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>, defaults: Self) -> Self {
        let is_container =
            lookup("KUBERNETES_SERVICE_HOST").is_some() || lookup("DOCKER_CONTAINER").is_some();

        Self {
            service_name: lookup("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),

            component: lookup("IL_COMPONENT").unwrap_or(defaults.component),

            log_level: lookup("IL_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            console_output: lookup("IL_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(defaults.console_output),

            json_logs: lookup("IL_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(is_container || defaults.json_logs),
        }
    }
}
