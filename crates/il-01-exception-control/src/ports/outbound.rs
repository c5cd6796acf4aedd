//! Outbound Ports (Driven Ports / SPI)

use crate::domain::entities::{CaughtException, HandlerOutcome};
use crate::domain::errors::HandlerError;
use async_trait::async_trait;

/// Exception handler callback
///
/// Implemented by application code and registered alongside a
/// `HandlerDescriptor`.
#[async_trait]
pub trait ExceptionHandler: Send + Sync {
    /// Handle one exception from the unwrapped cause stack.
    async fn handle(&self, event: &CaughtException) -> Result<HandlerOutcome, HandlerError>;
}
