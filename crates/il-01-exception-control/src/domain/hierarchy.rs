//! Exception type hierarchy
//!
//! Types register their direct supertypes once, at startup. The ancestor
//! closure and hierarchy depth of every type are derived from those
//! registrations and memoised.

use super::errors::ExceptionControlError;
use super::value_objects::ExceptionType;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of exception types and their direct supertypes.
#[derive(Debug, Default)]
pub struct TypeHierarchy {
    /// Direct supertypes, in declaration order
    supertypes: HashMap<ExceptionType, Vec<ExceptionType>>,
    /// Memoised closures, cleared on every registration
    closures: RwLock<HashMap<ExceptionType, Arc<[ExceptionType]>>>,
}

impl TypeHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `ty` with its direct supertypes (superclass first, then
    /// interfaces). Re-registering a type replaces its supertypes.
    pub fn register<I, T>(&mut self, ty: impl Into<ExceptionType>, supertypes: I) -> Result<(), ExceptionControlError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ExceptionType>,
    {
        let ty = ty.into();
        let supertypes: Vec<ExceptionType> = supertypes.into_iter().map(Into::into).collect();

        for parent in &supertypes {
            if *parent == ty || self.closure(parent).contains(&ty) {
                return Err(ExceptionControlError::HierarchyCycle {
                    ty: ty.to_string(),
                    supertype: parent.to_string(),
                });
            }
        }

        self.supertypes.insert(ty, supertypes);
        self.closures.write().clear();
        Ok(())
    }

    /// Builder-style registration for static hierarchies.
    pub fn with_type<I, T>(mut self, ty: impl Into<ExceptionType>, supertypes: I) -> Result<Self, ExceptionControlError>
    where
        I: IntoIterator<Item = T>,
        T: Into<ExceptionType>,
    {
        self.register(ty, supertypes)?;
        Ok(self)
    }

    /// Whether `ty` has been registered.
    pub fn contains(&self, ty: &ExceptionType) -> bool {
        self.supertypes.contains_key(ty)
    }

    /// Direct supertypes of `ty`. Empty for root and unknown types.
    pub fn supertypes(&self, ty: &ExceptionType) -> &[ExceptionType] {
        self.supertypes.get(ty).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every type `ty` is assignable to, itself first, most specific to
    /// least specific.
    pub fn closure(&self, ty: &ExceptionType) -> Arc<[ExceptionType]> {
        if let Some(cached) = self.closures.read().get(ty) {
            return Arc::clone(cached);
        }

        let mut closure = Vec::new();
        self.collect_closure(ty, &mut closure);
        let closure: Arc<[ExceptionType]> = closure.into();

        self.closures.write().insert(ty.clone(), Arc::clone(&closure));
        closure
    }

    fn collect_closure(&self, ty: &ExceptionType, out: &mut Vec<ExceptionType>) {
        if out.contains(ty) {
            return;
        }
        out.push(ty.clone());
        for parent in self.supertypes(ty) {
            self.collect_closure(parent, out);
        }
    }

    /// Position of `ancestor` in the closure of `ty`, if assignable.
    pub fn position(&self, ty: &ExceptionType, ancestor: &ExceptionType) -> Option<usize> {
        self.closure(ty).iter().position(|t| t == ancestor)
    }

    /// Whether a value of type `ty` can be handled as `ancestor`.
    pub fn is_assignable(&self, ty: &ExceptionType, ancestor: &ExceptionType) -> bool {
        self.position(ty, ancestor).is_some()
    }

    /// Length of the longest supertype chain above `ty`. Roots and unknown
    /// types have depth 0; a strict subtype is always deeper than each of
    /// its ancestors.
    pub fn depth(&self, ty: &ExceptionType) -> usize {
        self.supertypes(ty)
            .iter()
            .map(|parent| self.depth(parent) + 1)
            .max()
            .unwrap_or(0)
    }
}

/// Hierarchy of the common runtime exceptions, used by tests and demos.
pub fn standard_hierarchy() -> Result<TypeHierarchy, ExceptionControlError> {
    TypeHierarchy::new()
        .with_type("Throwable", ["Serializable"])?
        .with_type("Exception", ["Throwable"])?
        .with_type("RuntimeException", ["Exception"])?
        .with_type("IllegalArgumentException", ["RuntimeException"])?
        .with_type("NumberFormatException", ["IllegalArgumentException"])?
        .with_type("IllegalStateException", ["RuntimeException"])?
        .with_type("NullPointerException", ["RuntimeException"])?
        .with_type("IOException", ["Exception"])?
        .with_type("FileNotFoundException", ["IOException"])
}
