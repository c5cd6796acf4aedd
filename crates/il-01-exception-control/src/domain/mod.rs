//! Domain module for Exception Control
//!
//! Contains the type hierarchy, handler descriptors, errors, and invariants.

pub mod entities;
pub mod errors;
pub mod hierarchy;
pub mod invariants;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use hierarchy::{standard_hierarchy, TypeHierarchy};
pub use value_objects::*;
