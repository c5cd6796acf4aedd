//! Cause Chain Unwrapping
//!
//! Flattens a thrown exception into the stack walked by the dispatcher:
//! root cause first, outermost wrapper last.

use crate::domain::entities::{CaughtException, ThrownException};
use crate::domain::errors::ExceptionControlError;

/// Unwrap `exception` into a dispatch stack, rejecting chains longer than
/// `max_depth`.
pub fn unwrap_causes(
    exception: &ThrownException,
    max_depth: usize,
) -> Result<Vec<CaughtException>, ExceptionControlError> {
    let chain = exception.chain();
    if chain.len() > max_depth {
        return Err(ExceptionControlError::CauseChainTooDeep {
            depth: chain.len(),
            max: max_depth,
        });
    }

    let stack = chain
        .into_iter()
        .rev()
        .enumerate()
        .map(|(index, thrown)| CaughtException {
            exception_type: thrown.exception_type.clone(),
            message: thrown.message.clone(),
            stack_index: index,
            root_cause: index == 0,
            handled: false,
        })
        .collect();

    Ok(stack)
}
