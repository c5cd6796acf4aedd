//! Transaction metadata
//!
//! Attributes are registered per bean and per method at startup. Lookups
//! prefer the method attribute, fall back to the bean attribute, and are
//! memoised per invocation target.

use super::errors::TransactionError;
use super::value_objects::PropagationMode;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Declared transaction attribute
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionAttribute {
    /// Native propagation declaration
    Transactional(PropagationMode),
    /// EJB-style attribute name, e.g. `"REQUIRED"`
    Ejb(String),
}

impl TransactionAttribute {
    /// Map the attribute to a propagation mode.
    ///
    /// EJB `NOT_SUPPORTED` and `REQUIRES_NEW` are rejected: plain managed
    /// beans cannot suspend a transaction.
    pub fn resolve(&self) -> Result<PropagationMode, TransactionError> {
        match self {
            TransactionAttribute::Transactional(mode) => Ok(*mode),
            TransactionAttribute::Ejb(name) => {
                let mode = PropagationMode::from_name(name)
                    .ok_or_else(|| TransactionError::UnknownAttribute(name.clone()))?;
                if mode.requires_suspension() {
                    return Err(TransactionError::UnsupportedPropagation { mode });
                }
                Ok(mode)
            }
        }
    }
}

/// A bean method being invoked
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvocationTarget {
    pub bean: String,
    pub method: String,
}

impl InvocationTarget {
    pub fn new(bean: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            bean: bean.into(),
            method: method.into(),
        }
    }
}

impl fmt::Display for InvocationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.bean, self.method)
    }
}

/// Registered transaction attributes for beans and their methods
#[derive(Debug, Default)]
pub struct TransactionMetadataRegistry {
    methods: HashMap<InvocationTarget, TransactionAttribute>,
    beans: HashMap<String, TransactionAttribute>,
    resolved: RwLock<HashMap<InvocationTarget, Option<PropagationMode>>>,
}

impl TransactionMetadataRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an attribute on a single method.
    pub fn register_method(
        &mut self,
        bean: impl Into<String>,
        method: impl Into<String>,
        attribute: TransactionAttribute,
    ) {
        self.methods.insert(InvocationTarget::new(bean, method), attribute);
        self.resolved.write().clear();
    }

    /// Declare an attribute on every method of a bean.
    pub fn register_bean(&mut self, bean: impl Into<String>, attribute: TransactionAttribute) {
        self.beans.insert(bean.into(), attribute);
        self.resolved.write().clear();
    }

    /// Propagation mode for `target`, or `None` when nothing is declared.
    pub fn lookup(&self, target: &InvocationTarget) -> Result<Option<PropagationMode>, TransactionError> {
        if let Some(mode) = self.resolved.read().get(target) {
            return Ok(*mode);
        }

        let attribute = self
            .methods
            .get(target)
            .or_else(|| self.beans.get(&target.bean));
        let mode = attribute.map(TransactionAttribute::resolve).transpose()?;

        self.resolved.write().insert(target.clone(), mode);
        Ok(mode)
    }
}
