//! Block store — the ordered block collection of one document.
//!
//! The store is the only owner of the document's block sequence. Every
//! mutation builds the next [`DocumentSnapshot`] from the previous one;
//! blocks are replaced, never edited in place. Degenerate requests (unknown
//! id, `from == to`, stale indices) hand back the current snapshot unchanged.

use blockpad_types::{Block, BlockId, BlockKind, DocumentId};

use crate::drag::ReorderTarget;
use crate::snapshot::DocumentSnapshot;

/// Ordered, append-only collection of blocks.
///
/// Order is the rendering order and the only relation between blocks. Block
/// ids come from a store-local sequence counter, so they are unique for the
/// lifetime of the document regardless of how fast blocks are appended.
#[derive(Debug)]
pub struct BlockStore {
    /// Document this store belongs to.
    document_id: DocumentId,

    /// Current snapshot, top to bottom.
    blocks: DocumentSnapshot,

    /// Next sequence number for block IDs. Never decreases.
    next_seq: u64,

    /// Store version (bumped on every effective mutation).
    version: u64,
}

impl BlockStore {
    /// Create a new empty store.
    pub fn new(document_id: DocumentId) -> Self {
        Self {
            document_id,
            blocks: DocumentSnapshot::default(),
            next_seq: 0,
            version: 0,
        }
    }

    /// Create a store holding a single seed block.
    pub fn with_seed(document_id: DocumentId, kind: BlockKind, content: impl Into<String>) -> Self {
        let mut store = Self::new(document_id);
        let id = store.new_block_id();
        store.blocks = DocumentSnapshot::new(vec![Block::with_content(id, kind, content)]);
        store
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the document ID.
    pub fn document_id(&self) -> DocumentId {
        self.document_id
    }

    /// Get the current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> DocumentSnapshot {
        self.blocks.clone()
    }

    /// Get the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the store has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get a block by ID.
    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == *id)
    }

    /// Current position of a block.
    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == *id)
    }

    /// Block IDs in document order.
    pub fn block_ids_ordered(&self) -> Vec<BlockId> {
        self.blocks.iter().map(|b| b.id).collect()
    }

    // =========================================================================
    // Block ID generation
    // =========================================================================

    fn new_block_id(&mut self) -> BlockId {
        let id = BlockId::new(self.document_id, self.next_seq);
        self.next_seq += 1;
        id
    }

    fn publish(&mut self, blocks: Vec<Block>) -> DocumentSnapshot {
        self.blocks = DocumentSnapshot::new(blocks);
        self.version += 1;
        self.blocks.clone()
    }

    // =========================================================================
    // Block Operations
    // =========================================================================

    /// Append a new empty block of `kind` at the end.
    pub fn append(&mut self, kind: BlockKind) -> DocumentSnapshot {
        let id = self.new_block_id();
        let mut blocks = self.blocks.to_vec();
        blocks.push(Block::empty(id, kind));
        tracing::debug!(block = %id, %kind, len = blocks.len(), "appended block");
        self.publish(blocks)
    }

    /// Replace the content of the block with `id`.
    ///
    /// Unknown ids and unchanged content leave the snapshot as it was.
    pub fn update_content(&mut self, id: &BlockId, content: impl Into<String>) -> DocumentSnapshot {
        let content = content.into();
        let Some(pos) = self.position(id) else {
            tracing::debug!(block = %id, "content update for unknown block ignored");
            return self.snapshot();
        };
        if self.blocks[pos].content == content {
            return self.snapshot();
        }

        let mut blocks = self.blocks.to_vec();
        blocks[pos] = blocks[pos].replace_content(content);
        tracing::debug!(block = %id, pos, "updated block content");
        self.publish(blocks)
    }

    /// Move the block at `from` so that it ends up at `to`.
    ///
    /// Blocks between the two positions shift by one; everything else keeps
    /// its relative order. `from == to` is a no-op, a `from` past the end is
    /// ignored, and a `to` past the end is clamped to the last position.
    pub fn reorder(&mut self, from: usize, to: usize) -> DocumentSnapshot {
        self.move_index(from, to);
        self.snapshot()
    }

    /// Perform a reorder and report where the block landed.
    ///
    /// Returns `None` when nothing moved.
    fn move_index(&mut self, from: usize, to: usize) -> Option<usize> {
        let len = self.blocks.len();
        if from >= len {
            tracing::warn!(from, len, "reorder from stale index ignored");
            return None;
        }
        let to = if to >= len {
            tracing::warn!(to, len, "reorder target clamped to last position");
            len - 1
        } else {
            to
        };
        if from == to {
            return None;
        }

        let mut blocks = self.blocks.to_vec();
        let block = blocks.remove(from);
        tracing::debug!(block = %block.id, from, to, "moved block");
        blocks.insert(to, block);
        self.publish(blocks);
        Some(to)
    }
}

impl ReorderTarget for BlockStore {
    fn reorder_block(&mut self, from: usize, to: usize) -> Option<usize> {
        self.move_index(from, to)
    }
}

// ============================================================================
// Tests
// ============================================================================
