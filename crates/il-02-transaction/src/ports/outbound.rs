//! Outbound Ports (Driven Ports / SPI)

use crate::domain::errors::{DelegateError, TransactionError};
use crate::domain::synchronization::SynchronizationContext;
use crate::domain::value_objects::{TransactionId, TransactionStatus};
use async_trait::async_trait;
use std::sync::Arc;

/// Transaction demarcation delegate (JTA `UserTransaction` shaped)
#[async_trait]
pub trait UserTransaction: Send + Sync {
    async fn begin(&self) -> Result<(), DelegateError>;

    async fn commit(&self) -> Result<(), DelegateError>;

    async fn rollback(&self) -> Result<(), DelegateError>;

    async fn status(&self) -> Result<TransactionStatus, DelegateError>;

    async fn set_rollback_only(&self) -> Result<(), DelegateError>;

    /// Applies to transactions begun after the call.
    async fn set_transaction_timeout(&self, timeout_secs: u64) -> Result<(), DelegateError>;
}

/// Transaction manager view used to track container transactions
pub trait TransactionManager: Send + Sync {
    /// The transaction bound to the caller, if any.
    fn current_transaction(&self) -> Result<Option<TransactionId>, DelegateError>;

    /// Have the manager call `sync` when `transaction` completes.
    ///
    /// `before_completion` runs before a commit takes effect and
    /// `after_completion` runs once the outcome is known, for commit and
    /// rollback alike.
    fn register_completion(
        &self,
        transaction: TransactionId,
        sync: Arc<dyn Synchronization>,
    ) -> Result<(), DelegateError>;
}

/// Completion callback registered with a transaction
pub trait Synchronization: Send + Sync {
    fn before_completion(&self);

    fn after_completion(&self, status: TransactionStatus);
}

/// Synchronization bookkeeping around transaction demarcation
///
/// Per-call-chain state lives in the `SynchronizationContext` passed to
/// every call.
pub trait Synchronizations: Send + Sync {
    fn after_transaction_begin(&self, ctx: &mut SynchronizationContext);

    fn before_transaction_commit(&self, ctx: &mut SynchronizationContext);

    fn after_transaction_completion(&self, ctx: &mut SynchronizationContext, success: bool);

    fn register_synchronization(
        &self,
        ctx: &mut SynchronizationContext,
        sync: Arc<dyn Synchronization>,
    ) -> Result<(), TransactionError>;
}
