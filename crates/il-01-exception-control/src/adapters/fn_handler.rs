//! Closure-backed exception handler

use crate::domain::entities::{CaughtException, HandlerOutcome};
use crate::domain::errors::HandlerError;
use crate::ports::outbound::ExceptionHandler;
use async_trait::async_trait;

/// Adapts a synchronous closure into an `ExceptionHandler`.
pub struct FnHandler<F> {
    f: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&CaughtException) -> Result<HandlerOutcome, HandlerError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F> ExceptionHandler for FnHandler<F>
where
    F: Fn(&CaughtException) -> Result<HandlerOutcome, HandlerError> + Send + Sync,
{
    async fn handle(&self, event: &CaughtException) -> Result<HandlerOutcome, HandlerError> {
        (self.f)(event)
    }
}
