//! Catch-all handler that logs and lets dispatch continue

use crate::domain::entities::{CaughtException, HandlerOutcome};
use crate::domain::errors::HandlerError;
use crate::ports::outbound::ExceptionHandler;
use async_trait::async_trait;
use tracing::warn;

/// Logs every exception it sees. Marks it handled when `claim` is set,
/// otherwise proceeds.
#[derive(Debug, Default)]
pub struct LoggingHandler {
    claim: bool,
}

impl LoggingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn claiming() -> Self {
        Self { claim: true }
    }
}

#[async_trait]
impl ExceptionHandler for LoggingHandler {
    async fn handle(&self, event: &CaughtException) -> Result<HandlerOutcome, HandlerError> {
        warn!(
            exception_type = %event.exception_type,
            message = %event.message,
            stack_index = event.stack_index,
            root_cause = event.root_cause,
            "Exception caught"
        );

        Ok(if self.claim {
            HandlerOutcome::MarkHandled
        } else {
            HandlerOutcome::Proceed
        })
    }
}
