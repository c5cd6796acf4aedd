//! In-process transaction delegate
//!
//! Tracks a single, non-nested transaction. Used for local resources and
//! in tests in place of a JTA transaction manager. Completion callbacks
//! registered for the current transaction run without the state lock held.

use crate::domain::errors::DelegateError;
use crate::domain::value_objects::{TransactionId, TransactionStatus};
use crate::ports::outbound::{Synchronization, TransactionManager, UserTransaction};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct State {
    status: TransactionStatus,
    current: Option<TransactionId>,
    next_id: u64,
    timeout_secs: Option<u64>,
    completions: Vec<Arc<dyn Synchronization>>,
    begun: usize,
    committed: usize,
    rolled_back: usize,
}

/// In-memory `UserTransaction` and `TransactionManager`
#[derive(Default)]
pub struct InMemoryUserTransaction {
    state: Mutex<State>,
    fail_commit: AtomicBool,
}

/// Counters exposed for assertions and diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TransactionCounts {
    pub begun: usize,
    pub committed: usize,
    pub rolled_back: usize,
}

impl InMemoryUserTransaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next commits fail and roll back instead.
    pub fn fail_commits(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    pub fn counts(&self) -> TransactionCounts {
        let state = self.state.lock();
        TransactionCounts {
            begun: state.begun,
            committed: state.committed,
            rolled_back: state.rolled_back,
        }
    }

    pub fn timeout_secs(&self) -> Option<u64> {
        self.state.lock().timeout_secs
    }

    /// Finish the current transaction and hand back its callbacks.
    fn complete(state: &mut State, committed: bool) -> Vec<Arc<dyn Synchronization>> {
        if committed {
            state.committed += 1;
        } else {
            state.rolled_back += 1;
        }
        state.status = TransactionStatus::NoTransaction;
        state.current = None;
        std::mem::take(&mut state.completions)
    }

    fn notify_after(callbacks: Vec<Arc<dyn Synchronization>>, status: TransactionStatus) {
        for sync in callbacks {
            sync.after_completion(status);
        }
    }
}

#[async_trait]
impl UserTransaction for InMemoryUserTransaction {
    async fn begin(&self) -> Result<(), DelegateError> {
        let mut state = self.state.lock();
        if state.status != TransactionStatus::NoTransaction {
            return Err(DelegateError::NotSupported(
                "nested transactions are not supported".to_string(),
            ));
        }

        state.next_id += 1;
        state.current = Some(TransactionId(state.next_id));
        state.status = TransactionStatus::Active;
        state.begun += 1;
        Ok(())
    }

    async fn commit(&self) -> Result<(), DelegateError> {
        let before = {
            let state = self.state.lock();
            match state.status {
                TransactionStatus::Active => state.completions.clone(),
                TransactionStatus::MarkedRollback => Vec::new(),
                status => {
                    return Err(DelegateError::IllegalState(format!(
                        "cannot commit in status {status:?}"
                    )))
                }
            }
        };
        for sync in &before {
            sync.before_completion();
        }

        // before_completion callbacks may have marked the transaction
        let (callbacks, result) = {
            let mut state = self.state.lock();
            if state.status == TransactionStatus::MarkedRollback {
                let callbacks = Self::complete(&mut state, false);
                (
                    callbacks,
                    Err(DelegateError::Rollback(
                        "transaction was marked rollback-only".to_string(),
                    )),
                )
            } else if self.fail_commit.load(Ordering::SeqCst) {
                let callbacks = Self::complete(&mut state, false);
                (callbacks, Err(DelegateError::Rollback("commit failed".to_string())))
            } else {
                (Self::complete(&mut state, true), Ok(()))
            }
        };

        let status = if result.is_ok() {
            TransactionStatus::Committed
        } else {
            TransactionStatus::RolledBack
        };
        Self::notify_after(callbacks, status);
        result
    }

    async fn rollback(&self) -> Result<(), DelegateError> {
        let callbacks = {
            let mut state = self.state.lock();
            if !state.status.is_active_or_marked_rollback() {
                return Err(DelegateError::IllegalState(format!(
                    "cannot roll back in status {:?}",
                    state.status
                )));
            }
            Self::complete(&mut state, false)
        };
        Self::notify_after(callbacks, TransactionStatus::RolledBack);
        Ok(())
    }

    async fn status(&self) -> Result<TransactionStatus, DelegateError> {
        Ok(self.state.lock().status)
    }

    async fn set_rollback_only(&self) -> Result<(), DelegateError> {
        let mut state = self.state.lock();
        if !state.status.is_active_or_marked_rollback() {
            return Err(DelegateError::IllegalState(
                "no transaction to mark rollback-only".to_string(),
            ));
        }
        state.status = TransactionStatus::MarkedRollback;
        Ok(())
    }

    async fn set_transaction_timeout(&self, timeout_secs: u64) -> Result<(), DelegateError> {
        self.state.lock().timeout_secs = (timeout_secs > 0).then_some(timeout_secs);
        Ok(())
    }
}

impl TransactionManager for InMemoryUserTransaction {
    fn current_transaction(&self) -> Result<Option<TransactionId>, DelegateError> {
        Ok(self.state.lock().current)
    }

    fn register_completion(
        &self,
        transaction: TransactionId,
        sync: Arc<dyn Synchronization>,
    ) -> Result<(), DelegateError> {
        let mut state = self.state.lock();
        if state.current != Some(transaction) {
            return Err(DelegateError::IllegalState(format!(
                "{transaction} is not the current transaction"
            )));
        }
        state.completions.push(sync);
        Ok(())
    }
}
