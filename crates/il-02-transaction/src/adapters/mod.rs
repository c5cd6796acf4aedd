//! Adapters for Transactions
//!
//! Delegate wrapper, synchronizations and an in-process delegate.

pub mod in_memory;
pub mod synchronizations;
pub mod ut_transaction;

pub use in_memory::{InMemoryUserTransaction, TransactionCounts};
pub use synchronizations::{LocalSynchronizations, TransactionManagerSynchronizations};
pub use ut_transaction::UtTransaction;
