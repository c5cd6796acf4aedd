//! Transaction Propagation Decision
//!
//! | mode          | new transaction                         |
//! |---------------|-----------------------------------------|
//! | REQUIRED      | when none is active                     |
//! | MANDATORY     | never; fails when none is active        |
//! | SUPPORTS      | never                                   |
//! | NEVER         | never; fails when one is active         |
//! | NOT_SUPPORTED | rejected, needs suspension              |
//! | REQUIRES_NEW  | rejected, needs suspension              |

use super::errors::TransactionError;
use super::value_objects::PropagationMode;

/// Decide whether a unit of work must begin a new transaction.
pub fn needs_new_transaction(
    mode: PropagationMode,
    transaction_active: bool,
) -> Result<bool, TransactionError> {
    match mode {
        PropagationMode::Required => Ok(!transaction_active),
        PropagationMode::Mandatory => {
            if !transaction_active {
                return Err(TransactionError::IllegalState(
                    "no transaction active on call to MANDATORY method".to_string(),
                ));
            }
            Ok(false)
        }
        PropagationMode::Supports => Ok(false),
        PropagationMode::Never => {
            if transaction_active {
                return Err(TransactionError::IllegalState(
                    "transaction active on call to NEVER method".to_string(),
                ));
            }
            Ok(false)
        }
        PropagationMode::NotSupported | PropagationMode::RequiresNew => {
            Err(TransactionError::UnsupportedPropagation { mode })
        }
    }
}

impl PropagationMode {
    pub fn is_new_transaction_required(self, transaction_active: bool) -> Result<bool, TransactionError> {
        needs_new_transaction(self, transaction_active)
    }
}
