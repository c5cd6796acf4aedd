//! Synchronization registry and per-call-chain context

use super::value_objects::{TransactionId, TransactionStatus};
use crate::ports::outbound::Synchronization;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ordered synchronizations attached to one transaction
///
/// Clones share the same list, so a clone handed to a transaction manager
/// notifies everything registered through the context afterwards.
#[derive(Default, Clone)]
pub struct SynchronizationRegistry {
    synchronizations: Arc<Mutex<Vec<Arc<dyn Synchronization>>>>,
    completed: Arc<AtomicBool>,
}

impl SynchronizationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_synchronization(&self, sync: Arc<dyn Synchronization>) {
        self.synchronizations.lock().push(sync);
    }

    pub fn before_transaction_completion(&self) {
        for sync in self.snapshot() {
            sync.before_completion();
        }
    }

    pub fn after_transaction_completion(&self, success: bool) {
        let status = if success {
            TransactionStatus::Committed
        } else {
            TransactionStatus::RolledBack
        };
        self.completed.store(true, Ordering::SeqCst);
        for sync in self.snapshot() {
            sync.after_completion(status);
        }
    }

    /// Whether the transaction this registry belongs to has completed.
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.synchronizations.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.synchronizations.lock().is_empty()
    }

    // Callbacks run without the lock held
    fn snapshot(&self) -> Vec<Arc<dyn Synchronization>> {
        self.synchronizations.lock().clone()
    }
}

impl Synchronization for SynchronizationRegistry {
    fn before_completion(&self) {
        self.before_transaction_completion();
    }

    fn after_completion(&self, status: TransactionStatus) {
        self.after_transaction_completion(status == TransactionStatus::Committed);
    }
}

/// Nested transaction scopes of one call chain
///
/// Transactions and their registries are pushed and popped together; the
/// top entry belongs to the innermost scope.
#[derive(Default)]
pub struct SynchronizationContext {
    transactions: Vec<Option<TransactionId>>,
    registries: Vec<SynchronizationRegistry>,
}

impl SynchronizationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, transaction: Option<TransactionId>) {
        self.transactions.push(transaction);
        self.registries.push(SynchronizationRegistry::new());
    }

    pub fn pop(&mut self) -> Option<(Option<TransactionId>, SynchronizationRegistry)> {
        let transaction = self.transactions.pop()?;
        let registry = self.registries.pop()?;
        Some((transaction, registry))
    }

    /// Pop scopes whose transaction has completed. Returns how many went.
    pub fn prune_completed(&mut self) -> usize {
        let mut pruned = 0;
        while self.current_registry().is_some_and(SynchronizationRegistry::is_completed) {
            self.pop();
            pruned += 1;
        }
        pruned
    }

    pub fn current_transaction(&self) -> Option<TransactionId> {
        self.transactions.last().copied().flatten()
    }

    pub fn current_registry(&self) -> Option<&SynchronizationRegistry> {
        self.registries.last()
    }

    pub fn depth(&self) -> usize {
        self.registries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}
