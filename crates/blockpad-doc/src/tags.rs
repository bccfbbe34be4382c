//! Document tags: an insertion-ordered set of non-empty labels.
//!
//! Tags are only ever added. Empty and duplicate submissions are dropped
//! silently, and in that case the pending input is left as typed.

use crate::snapshot::TagSnapshot;

/// The document's labels plus the text currently typed in the tag input.
#[derive(Debug, Default)]
pub struct TagSet {
    tags: TagSnapshot,
    pending: String,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current tags, in insertion order.
    pub fn snapshot(&self) -> TagSnapshot {
        self.tags.clone()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Exact-match membership.
    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Text waiting in the tag input.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn set_pending(&mut self, text: impl Into<String>) {
        self.pending = text.into();
    }

    /// Add `candidate` if it is non-empty and not already present.
    ///
    /// On success the pending input is cleared.
    pub fn add(&mut self, candidate: &str) -> TagSnapshot {
        if candidate.is_empty() || self.contains(candidate) {
            tracing::debug!(tag = candidate, "tag ignored");
            return self.snapshot();
        }

        let mut tags = self.tags.to_vec();
        tags.push(candidate.to_string());
        self.tags = TagSnapshot::new(tags);
        self.pending.clear();
        tracing::debug!(tag = candidate, count = self.tags.len(), "tag added");
        self.snapshot()
    }

    /// Submit the pending input as a tag.
    pub fn submit(&mut self) -> TagSnapshot {
        let candidate = self.pending.clone();
        self.add(&candidate)
    }
}
