//! Handler Ordering
//!
//! Total order over handler descriptors used for dispatch:
//!
//! 1. Different exception types: a type sorts before any of its ancestors.
//!    Unrelated types sort deeper-first, then by type name.
//! 2. Same exception type: `DepthFirst` before `BreadthFirst`, then
//!    precedence (ascending for `DepthFirst`, descending otherwise).
//! 3. Same type and precedence: unqualified handlers collapse into one,
//!    qualified handlers never compare equal and keep registration order.

use crate::domain::entities::HandlerDescriptor;
use crate::domain::hierarchy::TypeHierarchy;
use crate::domain::value_objects::ExceptionType;
use std::cmp::Ordering;
use tracing::debug;

/// Comparator bound to a type hierarchy.
#[derive(Clone, Copy, Debug)]
pub struct HandlerComparator<'a> {
    hierarchy: &'a TypeHierarchy,
}

impl<'a> HandlerComparator<'a> {
    pub fn new(hierarchy: &'a TypeHierarchy) -> Self {
        Self { hierarchy }
    }

    pub fn compare(&self, lhs: &HandlerDescriptor, rhs: &HandlerDescriptor) -> Ordering {
        if lhs == rhs {
            return Ordering::Equal;
        }

        if lhs.exception_type == rhs.exception_type {
            Self::compare_same_type(lhs, rhs)
        } else {
            self.compare_hierarchies(&lhs.exception_type, &rhs.exception_type)
        }
    }

    fn compare_same_type(lhs: &HandlerDescriptor, rhs: &HandlerDescriptor) -> Ordering {
        let mode = lhs.traversal_mode.rank().cmp(&rhs.traversal_mode.rank());
        if mode != Ordering::Equal {
            return mode;
        }

        let precedence = if lhs.traversal_mode.is_ascending() {
            lhs.precedence.cmp(&rhs.precedence)
        } else {
            rhs.precedence.cmp(&lhs.precedence)
        };
        if precedence != Ordering::Equal {
            return precedence;
        }

        match (lhs.is_qualified(), rhs.is_qualified()) {
            // Same handler for dispatch purposes
            (false, false) => Ordering::Equal,
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => lhs
                .sequence
                .cmp(&rhs.sequence)
                .then_with(|| lhs.qualifiers.cmp(&rhs.qualifiers))
                .then_with(|| lhs.name.cmp(&rhs.name)),
        }
    }

    fn compare_hierarchies(&self, lhs: &ExceptionType, rhs: &ExceptionType) -> Ordering {
        if self.hierarchy.is_assignable(lhs, rhs) {
            return Ordering::Less;
        }
        if self.hierarchy.is_assignable(rhs, lhs) {
            return Ordering::Greater;
        }

        // Unrelated hierarchies
        self.hierarchy
            .depth(rhs)
            .cmp(&self.hierarchy.depth(lhs))
            .then_with(|| lhs.cmp(rhs))
    }
}

/// Order handlers for dispatch, dropping descriptors that compare equal to
/// an earlier one.
pub fn order_handlers(
    handlers: impl IntoIterator<Item = HandlerDescriptor>,
    hierarchy: &TypeHierarchy,
) -> Vec<HandlerDescriptor> {
    let comparator = HandlerComparator::new(hierarchy);
    let mut ordered: Vec<HandlerDescriptor> = handlers.into_iter().collect();

    ordered.sort_by(|a, b| comparator.compare(a, b));
    ordered.dedup_by(|later, kept| {
        let duplicate = comparator.compare(later, kept) == Ordering::Equal;
        if duplicate {
            debug!(
                handler = %later.name,
                kept = %kept.name,
                exception_type = %later.exception_type,
                "Dropping duplicate handler"
            );
        }
        duplicate
    });

    ordered
}
