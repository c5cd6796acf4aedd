//! Application layer for Transactions
//!
//! Runs units of work under the propagation rules.

pub mod interceptor;
pub mod work;

pub use interceptor::TransactionInterceptor;
pub use work::Work;
