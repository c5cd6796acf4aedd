//! Core entities for Exception Control

use super::value_objects::{
    ExceptionType, Precedence, Qualifier, Qualifiers, TraversalMode, DEFAULT_PRECEDENCE,
};
use serde::{Deserialize, Serialize};

/// Metadata describing one exception handler's applicability
///
/// Immutable once registered. `sequence` is assigned by the registry and
/// breaks ties between qualified handlers of the same type and precedence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandlerDescriptor {
    /// Human readable handler name (for logs)
    pub name: String,
    /// Exception type handled
    pub exception_type: ExceptionType,
    /// Qualifiers the dispatch must carry for this handler to apply
    pub qualifiers: Qualifiers,
    /// Ordering among handlers of the same type
    pub precedence: Precedence,
    /// Hierarchy traversal direction
    pub traversal_mode: TraversalMode,
    /// Registration order
    pub sequence: u64,
}

impl HandlerDescriptor {
    pub fn new(name: impl Into<String>, exception_type: impl Into<ExceptionType>) -> Self {
        Self {
            name: name.into(),
            exception_type: exception_type.into(),
            qualifiers: Qualifiers::new(),
            precedence: DEFAULT_PRECEDENCE,
            traversal_mode: TraversalMode::default(),
            sequence: 0,
        }
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_traversal_mode(mut self, mode: TraversalMode) -> Self {
        self.traversal_mode = mode;
        self
    }

    pub fn with_qualifier(mut self, qualifier: impl Into<Qualifier>) -> Self {
        self.qualifiers.insert(qualifier.into());
        self
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn is_qualified(&self) -> bool {
        !self.qualifiers.is_empty()
    }

    /// Whether this handler applies to a dispatch carrying `qualifiers`.
    /// Unqualified handlers apply to every dispatch.
    pub fn matches_qualifiers(&self, qualifiers: &Qualifiers) -> bool {
        self.qualifiers.is_subset(qualifiers)
    }
}

/// An exception value with its cause chain
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrownException {
    pub exception_type: ExceptionType,
    pub message: String,
    pub cause: Option<Box<ThrownException>>,
}

impl ThrownException {
    pub fn new(exception_type: impl Into<ExceptionType>, message: impl Into<String>) -> Self {
        Self {
            exception_type: exception_type.into(),
            message: message.into(),
            cause: None,
        }
    }

    pub fn caused_by(mut self, cause: ThrownException) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Outermost exception first, root cause last.
    pub fn chain(&self) -> Vec<&ThrownException> {
        let mut chain = vec![self];
        let mut current = self.cause.as_deref();
        while let Some(cause) = current {
            chain.push(cause);
            current = cause.cause.as_deref();
        }
        chain
    }

    pub fn root_cause(&self) -> &ThrownException {
        let mut current = self;
        while let Some(cause) = current.cause.as_deref() {
            current = cause;
        }
        current
    }
}

/// Event handed to each handler during dispatch
#[derive(Clone, Debug)]
pub struct CaughtException {
    pub exception_type: ExceptionType,
    pub message: String,
    /// Position in the unwrapped stack (0 = root cause)
    pub stack_index: usize,
    /// Whether this is the innermost cause
    pub root_cause: bool,
    /// Whether an earlier handler marked the exception handled
    pub handled: bool,
}

/// What a handler asks the dispatcher to do next
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerOutcome {
    /// Exception handled, stop dispatching
    Handled,
    /// Mark handled and keep notifying handlers
    MarkHandled,
    /// Not handled here, continue with the next handler
    Proceed,
    /// Skip remaining handlers for this exception, continue with its wrapper
    ProceedToCause,
    /// Stop dispatching without handling
    Abort,
    /// Stop dispatching and rethrow the original exception
    Rethrow,
}

/// Result of dispatching one thrown exception
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Whether any handler claimed the exception
    pub handled: bool,
    /// Whether a handler aborted dispatch
    pub aborted: bool,
    /// Number of handler invocations
    pub handlers_invoked: usize,
    /// Names of invoked handlers, in invocation order
    pub invoked: Vec<String>,
}
