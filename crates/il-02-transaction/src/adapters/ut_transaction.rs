//! Delegate wrapper that keeps synchronizations in step with demarcation

use crate::domain::errors::TransactionError;
use crate::domain::synchronization::SynchronizationContext;
use crate::domain::value_objects::TransactionStatus;
use crate::ports::outbound::{Synchronization, Synchronizations, UserTransaction};
use std::sync::Arc;
use tracing::debug;

/// Wraps a `UserTransaction` delegate and notifies `Synchronizations`
/// around begin, commit and rollback.
#[derive(Clone)]
pub struct UtTransaction {
    delegate: Arc<dyn UserTransaction>,
    synchronizations: Arc<dyn Synchronizations>,
}

impl UtTransaction {
    pub fn new(delegate: Arc<dyn UserTransaction>, synchronizations: Arc<dyn Synchronizations>) -> Self {
        Self {
            delegate,
            synchronizations,
        }
    }

    pub async fn begin(&self, ctx: &mut SynchronizationContext) -> Result<(), TransactionError> {
        debug!("beginning JTA transaction");
        self.delegate.begin().await?;
        self.synchronizations.after_transaction_begin(ctx);
        Ok(())
    }

    /// Commit; synchronizations are told the outcome whether or not the
    /// delegate succeeds.
    pub async fn commit(&self, ctx: &mut SynchronizationContext) -> Result<(), TransactionError> {
        debug!("committing JTA transaction");
        self.synchronizations.before_transaction_commit(ctx);

        let result = self.delegate.commit().await;
        self.synchronizations
            .after_transaction_completion(ctx, result.is_ok());
        result.map_err(Into::into)
    }

    pub async fn rollback(&self, ctx: &mut SynchronizationContext) -> Result<(), TransactionError> {
        debug!("rolling back JTA transaction");
        let result = self.delegate.rollback().await;
        self.synchronizations.after_transaction_completion(ctx, false);
        result.map_err(Into::into)
    }

    pub async fn status(&self) -> Result<TransactionStatus, TransactionError> {
        Ok(self.delegate.status().await?)
    }

    pub async fn is_active(&self) -> Result<bool, TransactionError> {
        Ok(self.status().await? == TransactionStatus::Active)
    }

    pub async fn is_marked_rollback(&self) -> Result<bool, TransactionError> {
        Ok(self.status().await? == TransactionStatus::MarkedRollback)
    }

    pub async fn set_rollback_only(&self) -> Result<(), TransactionError> {
        Ok(self.delegate.set_rollback_only().await?)
    }

    pub async fn set_transaction_timeout(&self, timeout_secs: u64) -> Result<(), TransactionError> {
        Ok(self.delegate.set_transaction_timeout(timeout_secs).await?)
    }

    pub fn register_synchronization(
        &self,
        ctx: &mut SynchronizationContext,
        sync: Arc<dyn Synchronization>,
    ) -> Result<(), TransactionError> {
        self.synchronizations.register_synchronization(ctx, sync)
    }
}
