//! Unit of work runner
//!
//! Begins a transaction when the propagation decision requires one, runs the
//! work, and completes only the transaction it began. Any enclosing scope in
//! the `SynchronizationContext` is left as it was found.

use crate::adapters::ut_transaction::UtTransaction;
use crate::config::TransactionConfig;
use crate::domain::errors::TransactionError;
use crate::domain::propagation::needs_new_transaction;
use crate::domain::synchronization::SynchronizationContext;
use crate::domain::value_objects::{PropagationMode, TransactionStatus};
use std::future::Future;
use tracing::{debug, warn};

/// Runs units of work inside transaction scopes
#[derive(Clone, Debug, Default)]
pub struct Work {
    config: TransactionConfig,
}

impl Work {
    pub fn new(config: TransactionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TransactionConfig {
        &self.config
    }

    /// Run `work` under `mode`. `None` runs it without transaction handling.
    pub async fn work_in_transaction<T, E, F, Fut>(
        &self,
        transaction: &UtTransaction,
        ctx: &mut SynchronizationContext,
        mode: Option<PropagationMode>,
        work: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&mut SynchronizationContext) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<TransactionError>,
    {
        let transaction_active = transaction.status().await?.is_transaction_active();
        let begin = match mode {
            Some(mode) => needs_new_transaction(mode, transaction_active)?,
            None => false,
        };

        self.run(transaction, ctx, begin, work).await
    }

    /// Run `work`, beginning a transaction first when `begin` is set.
    ///
    /// `work` is handed the context so it can register synchronizations with
    /// the scope it runs in before its future starts.
    pub async fn run<T, E, F, Fut>(
        &self,
        transaction: &UtTransaction,
        ctx: &mut SynchronizationContext,
        begin: bool,
        work: F,
    ) -> Result<T, E>
    where
        F: FnOnce(&mut SynchronizationContext) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<TransactionError>,
    {
        if begin {
            if let Some(timeout_secs) = self.config.default_timeout_secs {
                transaction.set_transaction_timeout(timeout_secs).await?;
            }
            debug!("beginning transaction");
            transaction.begin(ctx).await?;
        }

        match work(ctx).await {
            Ok(value) => {
                if begin {
                    let marked_rollback = match transaction.is_marked_rollback().await {
                        Ok(marked) => marked,
                        Err(e) => {
                            self.complete_after_failure(transaction, ctx).await;
                            return Err(e.into());
                        }
                    };
                    if marked_rollback {
                        debug!("rolling back transaction marked rollback-only");
                        transaction.rollback(ctx).await?;
                    } else {
                        debug!("committing transaction");
                        transaction.commit(ctx).await?;
                    }
                }
                Ok(value)
            }
            Err(err) => {
                if begin {
                    self.complete_after_failure(transaction, ctx).await;
                }
                Err(err)
            }
        }
    }

    /// Finish a transaction whose work failed. Failures here are logged; the
    /// work's own error is what the caller sees. An unreadable status is
    /// treated as rollback-only.
    async fn complete_after_failure(&self, transaction: &UtTransaction, ctx: &mut SynchronizationContext) {
        let status = match transaction.status().await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Could not read transaction status, rolling back");
                TransactionStatus::MarkedRollback
            }
        };
        if !status.is_active_or_marked_rollback() {
            return;
        }

        let result = if self.config.rollback_on_error || status == TransactionStatus::MarkedRollback {
            debug!("rolling back transaction after failed work");
            transaction.rollback(ctx).await
        } else {
            debug!("committing transaction after failed work");
            transaction.commit(ctx).await
        };

        if let Err(e) = result {
            warn!(error = %e, "Completing transaction after failed work failed");
        }
    }
}
