//! # IL-02: Transactions
//!
//! Propagation decisions for declaratively transactional bean methods, plus
//! the demarcation plumbing that acts on them.
//!
//! ## Architecture
//!
//! - **Domain**: Propagation modes, the decision table, transaction metadata,
//!   synchronization scopes
//! - **Ports**: Inbound (TransactionPropagationApi) and Outbound
//!   (UserTransaction, TransactionManager, Synchronizations)
//! - **Adapters**: In-memory delegate, synchronization strategies, UtTransaction
//! - **Application**: Work runner and interceptor

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{
    InMemoryUserTransaction, LocalSynchronizations, TransactionCounts,
    TransactionManagerSynchronizations, UtTransaction,
};
pub use application::{TransactionInterceptor, Work};
pub use config::TransactionConfig;
pub use domain::errors::{DelegateError, TransactionError};
pub use domain::metadata::{InvocationTarget, TransactionAttribute, TransactionMetadataRegistry};
pub use domain::propagation::needs_new_transaction;
pub use domain::synchronization::{SynchronizationContext, SynchronizationRegistry};
pub use domain::value_objects::*;
pub use ports::inbound::TransactionPropagationApi;
pub use ports::outbound::{Synchronization, Synchronizations, TransactionManager, UserTransaction};
