//! Error types for Exception Control

use thiserror::Error;

/// All errors that can occur while registering or dispatching handlers
#[derive(Debug, Error)]
pub enum ExceptionControlError {
    /// Registering the supertype would make the hierarchy cyclic
    #[error("Hierarchy cycle: {ty} cannot extend {supertype}")]
    HierarchyCycle { ty: String, supertype: String },

    /// Cause chain deeper than the configured limit
    #[error("Cause chain too deep: {depth} > {max}")]
    CauseChainTooDeep { depth: usize, max: usize },

    /// No handler claimed the exception and rethrow is enabled
    #[error("Unhandled exception: {exception_type}: {message}")]
    Unhandled {
        exception_type: String,
        message: String,
    },

    /// A handler asked for the exception to be rethrown
    #[error("Rethrown by handler: {exception_type}")]
    Rethrown { exception_type: String },

    /// A handler failed while running
    #[error("Handler failed: {0}")]
    Handler(#[from] HandlerError),
}

/// Error raised by a handler implementation
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("Handler {handler} failed: {reason}")]
    Failed { handler: String, reason: String },
}
