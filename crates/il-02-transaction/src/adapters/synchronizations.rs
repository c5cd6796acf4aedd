//! Synchronizations implementations
//!
//! - `LocalSynchronizations`: scopes follow transactions begun through
//!   `UtTransaction`.
//! - `TransactionManagerSynchronizations`: scopes follow the transaction
//!   manager's current transaction, so container-started transactions are
//!   tracked too. The manager delivers completion.

use crate::domain::errors::TransactionError;
use crate::domain::synchronization::SynchronizationContext;
use crate::ports::outbound::{Synchronization, Synchronizations, TransactionManager};
use std::sync::Arc;
use tracing::debug;

/// Synchronizations for locally demarcated transactions
#[derive(Debug, Default)]
pub struct LocalSynchronizations;

impl LocalSynchronizations {
    pub fn new() -> Self {
        Self
    }
}

impl Synchronizations for LocalSynchronizations {
    fn after_transaction_begin(&self, ctx: &mut SynchronizationContext) {
        ctx.push(None);
    }

    fn before_transaction_commit(&self, ctx: &mut SynchronizationContext) {
        if let Some(registry) = ctx.current_registry() {
            registry.before_transaction_completion();
        }
    }

    fn after_transaction_completion(&self, ctx: &mut SynchronizationContext, success: bool) {
        if let Some((_, registry)) = ctx.pop() {
            registry.after_transaction_completion(success);
        }
    }

    fn register_synchronization(
        &self,
        ctx: &mut SynchronizationContext,
        sync: Arc<dyn Synchronization>,
    ) -> Result<(), TransactionError> {
        ctx.current_registry()
            .ok_or(TransactionError::NoActiveTransaction)?
            .register_synchronization(sync);
        Ok(())
    }
}

/// Synchronizations keyed on the transaction manager's current transaction
///
/// Each scope's registry is registered with the manager, which notifies it
/// when the transaction completes. Completed scopes are dropped from the
/// context on the next demarcation or registration.
pub struct TransactionManagerSynchronizations {
    manager: Arc<dyn TransactionManager>,
}

impl TransactionManagerSynchronizations {
    pub fn new(manager: Arc<dyn TransactionManager>) -> Self {
        Self { manager }
    }
}

impl Synchronizations for TransactionManagerSynchronizations {
    fn after_transaction_begin(&self, ctx: &mut SynchronizationContext) {
        ctx.prune_completed();
    }

    // The manager runs before_completion itself
    fn before_transaction_commit(&self, _ctx: &mut SynchronizationContext) {}

    fn after_transaction_completion(&self, ctx: &mut SynchronizationContext, _success: bool) {
        let pruned = ctx.prune_completed();
        if pruned > 0 {
            debug!(pruned, "Dropped completed synchronization scopes");
        }
    }

    fn register_synchronization(
        &self,
        ctx: &mut SynchronizationContext,
        sync: Arc<dyn Synchronization>,
    ) -> Result<(), TransactionError> {
        ctx.prune_completed();
        let transaction = self
            .manager
            .current_transaction()?
            .ok_or(TransactionError::NoActiveTransaction)?;

        if ctx.current_transaction() != Some(transaction) {
            debug!(%transaction, "Tracking container transaction");
            ctx.push(Some(transaction));
            let registry = ctx
                .current_registry()
                .cloned()
                .ok_or(TransactionError::NoActiveTransaction)?;
            if let Err(e) = self.manager.register_completion(transaction, Arc::new(registry)) {
                ctx.pop();
                return Err(e.into());
            }
        }

        ctx.current_registry()
            .ok_or(TransactionError::NoActiveTransaction)?
            .register_synchronization(sync);
        Ok(())
    }
}
