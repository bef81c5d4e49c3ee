//! Collection identity and parent handles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique collection IDs
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a live entity collection.
///
/// Every collection draws a fresh id on creation, so a `ParentRef` can tell
/// two collections apart even when their slot indices coincide.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(u64);

impl CollectionId {
    /// Create a new unique CollectionId
    pub fn new() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for CollectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CollectionId({})", self.0)
    }
}

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-owning back-reference from an entity to the collection holding it.
///
/// Only the owning collection writes this; it is rewritten whenever the
/// entity's slot moves.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct ParentRef {
    pub collection: CollectionId,
    pub index: usize,
}

impl ParentRef {
    pub fn new(collection: CollectionId, index: usize) -> Self {
        Self { collection, index }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_generation() {
        let id1 = CollectionId::new();
        let id2 = CollectionId::new();
        assert_ne!(id1, id2);
        assert!(id2.raw() > id1.raw());
    }

    #[test]
    fn test_parent_ref_equality() {
        let collection = CollectionId::new();
        assert_eq!(ParentRef::new(collection, 3), ParentRef::new(collection, 3));
        assert_ne!(ParentRef::new(collection, 3), ParentRef::new(collection, 4));
    }
}
