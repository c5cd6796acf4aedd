//! Configuration for Exception Control

use serde::{Deserialize, Serialize};

/// Dispatch configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExceptionControlConfig {
    /// Maximum cause chain length accepted by the dispatcher
    pub max_cause_depth: usize,
    /// Return `Unhandled` errors when no handler claims an exception
    pub rethrow_unhandled: bool,
    /// Emit a debug event for every handler invocation
    pub log_handler_invocations: bool,
}

impl Default for ExceptionControlConfig {
    fn default() -> Self {
        Self {
            max_cause_depth: 32,
            rethrow_unhandled: false,
            log_handler_invocations: true,
        }
    }
}

impl ExceptionControlConfig {
    /// Create a config for testing (strict, short chains).
    pub fn for_testing() -> Self {
        Self {
            max_cause_depth: 8,
            rethrow_unhandled: true,
            log_handler_invocations: false,
        }
    }
}
