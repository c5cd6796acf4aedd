//! Value objects for Exception Control
//!
//! Identifiers for exception types and qualifiers, plus the traversal mode
//! and precedence carried by every handler descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Precedence used to order handlers of the same exception type.
pub type Precedence = i32;

/// Default precedence when a handler does not declare one.
pub const DEFAULT_PRECEDENCE: Precedence = 0;

/// Identifier of an exception type (e.g. `"IllegalArgumentException"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExceptionType(String);

impl ExceptionType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExceptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExceptionType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ExceptionType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Identifier of a handler qualifier (e.g. `"RestRequest"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Qualifier(String);

impl Qualifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Qualifier {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Qualifier set. Ordered so descriptors hash and print deterministically.
pub type Qualifiers = BTreeSet<Qualifier>;

/// Direction in which the exception type hierarchy is walked.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraversalMode {
    /// Leaf-to-root: most specific handlers first, lowest precedence first.
    #[default]
    DepthFirst,
    /// Root-to-leaf: highest precedence first.
    BreadthFirst,
}

impl TraversalMode {
    /// Sort rank, `DepthFirst` handlers come before `BreadthFirst` ones.
    pub fn rank(self) -> u8 {
        match self {
            TraversalMode::DepthFirst => 0,
            TraversalMode::BreadthFirst => 1,
        }
    }

    /// Whether precedence sorts ascending under this mode.
    pub fn is_ascending(self) -> bool {
        matches!(self, TraversalMode::DepthFirst)
    }
}
