//! Domain module for Transactions
//!
//! Contains propagation modes, the decision table, metadata and errors.

pub mod errors;
pub mod metadata;
pub mod propagation;
pub mod synchronization;
pub mod value_objects;

pub use errors::*;
pub use metadata::{InvocationTarget, TransactionAttribute, TransactionMetadataRegistry};
pub use propagation::needs_new_transaction;
pub use synchronization::{SynchronizationContext, SynchronizationRegistry};
pub use value_objects::*;
