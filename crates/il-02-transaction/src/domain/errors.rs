//! Error types for Transactions

use super::value_objects::PropagationMode;
use thiserror::Error;

/// All errors that can occur deciding or running transactional work
#[derive(Debug, Error)]
pub enum TransactionError {
    /// Propagation mode violated by the current transaction state
    #[error("Illegal state: {0}")]
    IllegalState(String),

    /// Mode needs transaction suspension, which managed beans do not support
    #[error("{mode} is not allowed on managed beans that cannot suspend transactions")]
    UnsupportedPropagation { mode: PropagationMode },

    /// Unrecognised transaction attribute name
    #[error("Unknown transaction attribute: {0}")]
    UnknownAttribute(String),

    /// Synchronization registered outside a transaction
    #[error("No active transaction to register synchronization with")]
    NoActiveTransaction,

    /// Failure reported by the transaction delegate
    #[error("Transaction delegate error: {0}")]
    Delegate(#[from] DelegateError),
}

/// Errors raised by a `UserTransaction` or `TransactionManager` delegate
#[derive(Debug, Clone, Error)]
pub enum DelegateError {
    #[error("Not supported: {0}")]
    NotSupported(String),

    #[error("Transaction rolled back: {0}")]
    Rollback(String),

    #[error("Heuristic outcome: {0}")]
    Heuristic(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("System error: {0}")]
    System(String),
}
