//! Transaction interceptor
//!
//! Looks up the declared propagation mode of the invoked bean method and runs
//! the invocation through [`Work`].

use super::work::Work;
use crate::adapters::ut_transaction::UtTransaction;
use crate::domain::errors::TransactionError;
use crate::domain::metadata::{InvocationTarget, TransactionMetadataRegistry};
use crate::domain::propagation::needs_new_transaction;
use crate::domain::synchronization::SynchronizationContext;
use crate::ports::inbound::TransactionPropagationApi;
use std::future::Future;
use std::sync::Arc;
use interlock_telemetry::log_tx_event;
use tracing::instrument;

/// Wraps bean method invocations in transactions
pub struct TransactionInterceptor {
    metadata: Arc<TransactionMetadataRegistry>,
    transaction: UtTransaction,
    work: Work,
}

impl TransactionInterceptor {
    pub fn new(metadata: Arc<TransactionMetadataRegistry>, transaction: UtTransaction, work: Work) -> Self {
        Self {
            metadata,
            transaction,
            work,
        }
    }

    pub fn transaction(&self) -> &UtTransaction {
        &self.transaction
    }

    /// Invoke `work` as the body of `target`.
    ///
    /// Fails before running the work when the declared mode forbids the
    /// current transaction state.
    #[instrument(skip_all, fields(target = %target))]
    pub async fn around_invoke<T, E, F, Fut>(
        &self,
        target: &InvocationTarget,
        ctx: &mut SynchronizationContext,
        work: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&mut SynchronizationContext) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<TransactionError>,
    {
        let transaction_active = self.transaction.status().await?.is_transaction_active();
        let begin = self.is_new_transaction_required(target, transaction_active)?;
        log_tx_event!(debug, "intercepting invocation", target, transaction_active, begin);

        self.work.run(&self.transaction, ctx, begin, work).await
    }
}

impl TransactionPropagationApi for TransactionInterceptor {
    fn is_new_transaction_required(
        &self,
        target: &InvocationTarget,
        transaction_active: bool,
    ) -> Result<bool, TransactionError> {
        match self.metadata.lookup(target)? {
            Some(mode) => needs_new_transaction(mode, transaction_active),
            None => Ok(false),
        }
    }
}
