//! Value objects for Transactions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy governing whether a unit of work requires an existing, new, or no
/// transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropagationMode {
    /// Join the active transaction or begin one
    Required,
    /// An active transaction must already exist
    Mandatory,
    /// Run with or without a transaction
    Supports,
    /// No transaction may be active
    Never,
    /// Suspend any active transaction (requires suspension support)
    NotSupported,
    /// Always begin a fresh transaction (requires suspension support)
    RequiresNew,
}

impl PropagationMode {
    pub const ALL: [PropagationMode; 6] = [
        PropagationMode::Required,
        PropagationMode::Mandatory,
        PropagationMode::Supports,
        PropagationMode::Never,
        PropagationMode::NotSupported,
        PropagationMode::RequiresNew,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropagationMode::Required => "REQUIRED",
            PropagationMode::Mandatory => "MANDATORY",
            PropagationMode::Supports => "SUPPORTS",
            PropagationMode::Never => "NEVER",
            PropagationMode::NotSupported => "NOT_SUPPORTED",
            PropagationMode::RequiresNew => "REQUIRES_NEW",
        }
    }

    /// Parse an EJB-style attribute name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == name)
    }

    /// Modes that need a container able to suspend the active transaction.
    pub fn requires_suspension(self) -> bool {
        matches!(self, PropagationMode::NotSupported | PropagationMode::RequiresNew)
    }
}

impl fmt::Display for PropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction status, numbered as in JTA `javax.transaction.Status`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionStatus {
    Active,
    MarkedRollback,
    Prepared,
    Committed,
    RolledBack,
    Unknown,
    #[default]
    NoTransaction,
    Preparing,
    Committing,
    RollingBack,
}

impl TransactionStatus {
    pub fn code(self) -> i32 {
        match self {
            TransactionStatus::Active => 0,
            TransactionStatus::MarkedRollback => 1,
            TransactionStatus::Prepared => 2,
            TransactionStatus::Committed => 3,
            TransactionStatus::RolledBack => 4,
            TransactionStatus::Unknown => 5,
            TransactionStatus::NoTransaction => 6,
            TransactionStatus::Preparing => 7,
            TransactionStatus::Committing => 8,
            TransactionStatus::RollingBack => 9,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        let status = match code {
            0 => TransactionStatus::Active,
            1 => TransactionStatus::MarkedRollback,
            2 => TransactionStatus::Prepared,
            3 => TransactionStatus::Committed,
            4 => TransactionStatus::RolledBack,
            5 => TransactionStatus::Unknown,
            6 => TransactionStatus::NoTransaction,
            7 => TransactionStatus::Preparing,
            8 => TransactionStatus::Committing,
            9 => TransactionStatus::RollingBack,
            _ => return None,
        };
        Some(status)
    }

    pub fn is_active_or_marked_rollback(self) -> bool {
        matches!(self, TransactionStatus::Active | TransactionStatus::MarkedRollback)
    }

    /// Whether a unit of work starting now runs inside a transaction.
    pub fn is_transaction_active(self) -> bool {
        self.is_active_or_marked_rollback() || self == TransactionStatus::RolledBack
    }
}

/// Identifier of a transaction as reported by the transaction manager
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub u64);

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx-{}", self.0)
    }
}
