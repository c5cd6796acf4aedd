//! Application layer for Exception Control
//!
//! Handler registration and the dispatch service.

pub mod registry;
pub mod service;

pub use registry::HandlerRegistry;
pub use service::ExceptionDispatcher;
