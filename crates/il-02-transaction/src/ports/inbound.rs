//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::TransactionError;
use crate::domain::metadata::InvocationTarget;

/// Transaction propagation API
pub trait TransactionPropagationApi: Send + Sync {
    /// Whether invoking `target` must begin a new transaction.
    ///
    /// Resolves the declared propagation mode (method first, then bean) and
    /// applies the decision table. Targets without a declaration never need
    /// one.
    fn is_new_transaction_required(
        &self,
        target: &InvocationTarget,
        transaction_active: bool,
    ) -> Result<bool, TransactionError>;
}
