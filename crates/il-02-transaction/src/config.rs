//! Configuration for Transactions

use serde::{Deserialize, Serialize};

/// Transaction configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionConfig {
    /// Timeout applied before beginning a transaction (None = delegate default)
    pub default_timeout_secs: Option<u64>,
    /// Roll back a transaction begun for a unit of work that fails
    pub rollback_on_error: bool,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: None,
            rollback_on_error: true,
        }
    }
}

impl TransactionConfig {
    /// Create a config for testing (short timeout).
    pub fn for_testing() -> Self {
        Self {
            default_timeout_secs: Some(5),
            rollback_on_error: true,
        }
    }
}
