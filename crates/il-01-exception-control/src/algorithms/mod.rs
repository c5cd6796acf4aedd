//! Algorithms module for Exception Control
//!
//! Contains:
//! - Handler ordering comparator
//! - Handler resolution for a thrown type
//! - Cause chain unwrapping

pub mod ordering;
pub mod resolution;
pub mod unwrap;

pub use ordering::{order_handlers, HandlerComparator};
pub use resolution::resolve_handlers;
pub use unwrap::unwrap_causes;
