//! Handler Resolution
//!
//! Selects the handlers that apply to a thrown type and orders them.

use super::ordering::order_handlers;
use crate::domain::entities::HandlerDescriptor;
use crate::domain::hierarchy::TypeHierarchy;
use crate::domain::value_objects::{ExceptionType, Qualifiers};

/// Handlers applicable to `exception_type` under `qualifiers`, in dispatch
/// order.
///
/// A handler applies when its exception type is in the closure of the thrown
/// type and its qualifiers are a subset of the dispatch qualifiers.
pub fn resolve_handlers<'a>(
    registered: impl IntoIterator<Item = &'a HandlerDescriptor>,
    exception_type: &ExceptionType,
    qualifiers: &Qualifiers,
    hierarchy: &TypeHierarchy,
) -> Vec<HandlerDescriptor> {
    let closure = hierarchy.closure(exception_type);

    let applicable = registered
        .into_iter()
        .filter(|handler| closure.contains(&handler.exception_type))
        .filter(|handler| handler.matches_qualifiers(qualifiers))
        .cloned();

    order_handlers(applicable, hierarchy)
}
