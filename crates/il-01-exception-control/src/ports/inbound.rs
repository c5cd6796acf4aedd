//! Inbound Ports (Driving Ports / API)

use crate::domain::entities::{DispatchOutcome, HandlerDescriptor, ThrownException};
use crate::domain::errors::ExceptionControlError;
use crate::domain::value_objects::{ExceptionType, Qualifiers};
use async_trait::async_trait;

/// Handler ordering API
pub trait HandlerOrderingApi: Send + Sync {
    /// Order a descriptor set for dispatch.
    ///
    /// Pure function: the same set always yields the same sequence.
    fn order(&self, handlers: Vec<HandlerDescriptor>) -> Vec<HandlerDescriptor>;

    /// Registered handlers applicable to `exception_type`, in dispatch order.
    fn resolve(&self, exception_type: &ExceptionType, qualifiers: &Qualifiers) -> Vec<HandlerDescriptor>;
}

/// Primary exception dispatch API
#[async_trait]
pub trait ExceptionDispatchApi: Send + Sync {
    /// Dispatch a thrown exception to registered handlers.
    ///
    /// Walks the cause chain root cause first, invoking the resolved handlers
    /// of each exception in order until one claims it.
    async fn dispatch(
        &self,
        exception: &ThrownException,
        qualifiers: &Qualifiers,
    ) -> Result<DispatchOutcome, ExceptionControlError>;
}
