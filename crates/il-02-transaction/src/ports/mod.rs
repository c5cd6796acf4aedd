//! Ports module for Transactions
//!
//! Defines inbound (API) and outbound (SPI) port traits.

pub mod inbound;
pub mod outbound;

pub use inbound::TransactionPropagationApi;
pub use outbound::{Synchronization, Synchronizations, TransactionManager, UserTransaction};
