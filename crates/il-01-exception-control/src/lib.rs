//! # IL-01: Exception Control
//!
//! Orders exception handlers and dispatches thrown exceptions to them.
//!
//! ## Architecture
//!
//! - **Domain**: Type hierarchy, handler descriptors, dispatch events
//! - **Algorithms**: Handler comparator, resolution, cause chain unwrapping
//! - **Ports**: Inbound (HandlerOrderingApi, ExceptionDispatchApi) and Outbound (ExceptionHandler)
//! - **Adapters**: Closure and logging handlers
//! - **Application**: Handler registry and dispatch service
//!
//! ## Ordering
//!
//! Handlers for more specific types run before handlers for their ancestors.
//! Handlers of the same type are ordered by traversal mode, then precedence.
//! Qualified handlers of equal precedence are never collapsed.

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::{FnHandler, LoggingHandler};
pub use algorithms::{order_handlers, resolve_handlers, HandlerComparator};
pub use application::{ExceptionDispatcher, HandlerRegistry};
pub use config::ExceptionControlConfig;
pub use domain::entities::*;
pub use domain::errors::{ExceptionControlError, HandlerError};
pub use domain::hierarchy::{standard_hierarchy, TypeHierarchy};
pub use domain::value_objects::*;
pub use ports::inbound::{ExceptionDispatchApi, HandlerOrderingApi};
pub use ports::outbound::ExceptionHandler;
