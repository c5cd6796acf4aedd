//! # Interlock Telemetry
//!
//! Logging setup for the interlock crates, built on `tracing-subscriber`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use interlock_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_telemetry(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `interlock` | Service name in logs |
//! | `IL_LOG_LEVEL` | `info` | Log level filter |
//! | `IL_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `IL_JSON_LOGS` | `false` | JSON output (on by default in containers) |

mod config;
mod logging;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use tracing_setup::env_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Install the global subscriber described by `config`.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    tracing_setup::init_tracing(config)
}

/// Install the test subscriber, ignoring an already installed one.
///
/// Test harnesses call this from every test. Output is off unless
/// `IL_CONSOLE_OUTPUT` turns it on.
pub fn init_for_tests() {
    let _ = init_telemetry(&TelemetryConfig::for_testing());
}
