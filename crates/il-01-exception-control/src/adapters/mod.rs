//! Adapters for Exception Control
//!
//! Ready-made `ExceptionHandler` implementations.

pub mod fn_handler;
pub mod logging_handler;

pub use fn_handler::FnHandler;
pub use logging_handler::LoggingHandler;
