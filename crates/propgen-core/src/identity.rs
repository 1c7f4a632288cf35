//! # Arena Identifiers
//!
//! A resource owns every property node of its field tree in a flat arena.
//! Nodes refer to each other (parent links, children, item and value types)
//! through `PropertyId`, never through shared pointers.

use serde::{Deserialize, Serialize};

/// Index of a property node within its resource's arena.
///
/// Only meaningful together with the arena that issued it; ids from one
/// resource must not be used to index another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub usize);

impl PropertyId {
    /// The arena slot this id points at.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "property:{}", self.0)
    }
}
