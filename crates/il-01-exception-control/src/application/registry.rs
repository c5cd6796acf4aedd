//! Handler Registry
//!
//! Explicit registration of handlers and the exception type hierarchy they
//! are resolved against.

use crate::algorithms::resolve_handlers;
use crate::domain::entities::HandlerDescriptor;
use crate::domain::errors::ExceptionControlError;
use crate::domain::hierarchy::TypeHierarchy;
use crate::domain::value_objects::{ExceptionType, Qualifiers};
use crate::ports::outbound::ExceptionHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Registered handlers keyed by registration sequence
pub struct HandlerRegistry {
    hierarchy: TypeHierarchy,
    descriptors: Vec<HandlerDescriptor>,
    handlers: HashMap<u64, Arc<dyn ExceptionHandler>>,
    next_sequence: u64,
}

impl HandlerRegistry {
    pub fn new(hierarchy: TypeHierarchy) -> Self {
        Self {
            hierarchy,
            descriptors: Vec::new(),
            handlers: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Register a handler. Any sequence on `descriptor` is replaced by the
    /// registry's own; the assigned sequence is returned.
    pub fn register(
        &mut self,
        descriptor: HandlerDescriptor,
        handler: Arc<dyn ExceptionHandler>,
    ) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let descriptor = descriptor.with_sequence(sequence);
        debug!(
            handler = %descriptor.name,
            exception_type = %descriptor.exception_type,
            precedence = descriptor.precedence,
            sequence,
            "Registered exception handler"
        );

        self.descriptors.push(descriptor);
        self.handlers.insert(sequence, handler);
        sequence
    }

    /// Register an exception type with its direct supertypes.
    pub fn register_type<I, T>(&mut self, ty: impl Into<ExceptionType>, supertypes: I) -> Result<(), ExceptionControlError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ExceptionType>,
    {
        self.hierarchy.register(ty, supertypes)
    }

    pub fn hierarchy(&self) -> &TypeHierarchy {
        &self.hierarchy
    }

    pub fn descriptors(&self) -> &[HandlerDescriptor] {
        &self.descriptors
    }

    pub fn handler(&self, sequence: u64) -> Option<Arc<dyn ExceptionHandler>> {
        self.handlers.get(&sequence).cloned()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Handlers applicable to `exception_type`, in dispatch order.
    pub fn resolve(&self, exception_type: &ExceptionType, qualifiers: &Qualifiers) -> Vec<HandlerDescriptor> {
        resolve_handlers(&self.descriptors, exception_type, qualifiers, &self.hierarchy)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new(TypeHierarchy::new())
    }
}
