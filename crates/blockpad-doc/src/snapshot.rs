//! Immutable, cheaply-cloned views of an ordered collection.
//!
//! Stores never mutate a published snapshot: each effective mutation builds
//! a new `Vec` and swaps the `Arc`. Observers holding an older snapshot keep
//! seeing exactly what they were handed.

use std::ops::Deref;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use blockpad_types::Block;

/// Point-in-time view of an ordered sequence.
#[derive(Debug)]
pub struct Snapshot<T>(Arc<Vec<T>>);

/// The document's blocks, top to bottom.
pub type DocumentSnapshot = Snapshot<Block>;

/// The document's tags, in insertion order.
pub type TagSnapshot = Snapshot<String>;

impl<T> Snapshot<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self(Arc::new(items))
    }

    /// Check whether two snapshots are the very same allocation.
    ///
    /// No-op mutations hand back the previous snapshot, so this is how a
    /// caller tells "nothing happened" apart from "rebuilt with equal
    /// contents".
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Copy the items out for editing into the next snapshot.
    pub(crate) fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.0.as_ref().clone()
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Deref for Snapshot<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.0.as_slice()
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl<T: Eq> Eq for Snapshot<T> {}

impl<T: Serialize> Serialize for Snapshot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.as_slice().serialize(serializer)
    }
}
