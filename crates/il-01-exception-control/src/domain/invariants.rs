//! Domain invariants for Exception Control

use super::entities::HandlerDescriptor;
use super::hierarchy::TypeHierarchy;

/// Specificity
/// No handler for a type is dispatched after a handler for one of its
/// strict ancestors.
pub fn invariant_specificity(ordered: &[HandlerDescriptor], hierarchy: &TypeHierarchy) -> bool {
    for (i, earlier) in ordered.iter().enumerate() {
        for later in &ordered[i + 1..] {
            if earlier.exception_type == later.exception_type {
                continue;
            }
            // `later` is a subtype of `earlier`: wrong way round
            if hierarchy.is_assignable(&later.exception_type, &earlier.exception_type) {
                return false;
            }
        }
    }

    true
}

/// Qualified Survival
/// Every qualified handler in the input is still present after ordering.
pub fn invariant_qualified_survive(input: &[HandlerDescriptor], ordered: &[HandlerDescriptor]) -> bool {
    input
        .iter()
        .filter(|handler| handler.is_qualified())
        .all(|handler| ordered.contains(handler))
}

/// Type Grouping
/// Handlers of the same exception type are contiguous.
pub fn invariant_types_contiguous(ordered: &[HandlerDescriptor]) -> bool {
    let mut seen = Vec::new();

    for window in ordered.chunk_by(|a, b| a.exception_type == b.exception_type) {
        let ty = &window[0].exception_type;
        if seen.contains(&ty) {
            return false;
        }
        seen.push(ty);
    }

    true
}
