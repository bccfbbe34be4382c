//! Editor session — composition root for one document being edited.
//!
//! Wires toolbar actions to [`BlockStore::append`], drag events through the
//! [`DragReorderController`], tag input to the [`TagSet`], and raw text input
//! to the [`TextSink`]. Every effective change is announced on the session's
//! [`FlowBus`].

use serde::Serialize;

use blockpad_types::{BlockId, BlockKind, DocumentId, SessionId};

use crate::block_store::BlockStore;
use crate::config::EditorConfig;
use crate::drag::{DragReorderController, DragSummary, ReorderTarget};
use crate::flows::{EditorFlow, FlowBus, Subscription};
use crate::snapshot::{DocumentSnapshot, TagSnapshot};
use crate::tags::TagSet;
use crate::text::TextSink;

/// Everything a session holds, as one serializable value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub document_id: DocumentId,
    pub version: u64,
    pub blocks: DocumentSnapshot,
    pub tags: TagSnapshot,
    pub pending_tag: String,
    pub text: String,
    /// Index of the block being dragged, if a drag is in progress.
    pub dragging: Option<usize>,
}

/// One in-memory editing session.
pub struct EditorSession {
    id: SessionId,
    store: BlockStore,
    tags: TagSet,
    drag: DragReorderController,
    text: TextSink,
    flows: FlowBus<EditorFlow>,
}

/// Reorder target that announces every committed move.
struct Announcing<'a> {
    store: &'a mut BlockStore,
    flows: &'a FlowBus<EditorFlow>,
}

impl ReorderTarget for Announcing<'_> {
    fn reorder_block(&mut self, from: usize, to: usize) -> Option<usize> {
        let landed = self.store.reorder_block(from, to)?;
        self.flows.publish(EditorFlow::BlockMoved {
            from,
            to: landed,
            document: self.store.snapshot(),
        });
        Some(landed)
    }
}

impl EditorSession {
    /// Start a session with a fresh document holding the configured seed block.
    pub fn new(config: &EditorConfig) -> Self {
        let id = SessionId::new();
        let document_id = DocumentId::new();
        tracing::info!(session = %id, document = %document_id, "editor session started");
        Self {
            id,
            store: BlockStore::with_seed(document_id, config.seed_kind, config.seed_text.clone()),
            tags: TagSet::new(),
            drag: DragReorderController::new(),
            text: TextSink::new(),
            flows: FlowBus::new(config.flow_capacity.max(1)),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn document_id(&self) -> DocumentId {
        self.store.document_id()
    }

    /// Current document snapshot.
    pub fn document(&self) -> DocumentSnapshot {
        self.store.snapshot()
    }

    /// Current tag snapshot.
    pub fn tags(&self) -> TagSnapshot {
        self.tags.snapshot()
    }

    pub fn pending_tag(&self) -> &str {
        self.tags.pending()
    }

    pub fn text(&self) -> &str {
        self.text.text()
    }

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn drag(&self) -> &DragReorderController {
        &self.drag
    }

    /// Subscribe to change events matching `pattern` (see [`crate::flows`]).
    pub fn subscribe(&self, pattern: &str) -> Subscription<EditorFlow> {
        self.flows.subscribe(pattern)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            document_id: self.store.document_id(),
            version: self.store.version(),
            blocks: self.store.snapshot(),
            tags: self.tags.snapshot(),
            pending_tag: self.tags.pending().to_string(),
            text: self.text.text().to_string(),
            dragging: self.drag.source(),
        }
    }

    // =========================================================================
    // Blocks
    // =========================================================================

    /// Toolbar action: append an empty block of `kind`.
    pub fn append(&mut self, kind: BlockKind) -> DocumentSnapshot {
        let document = self.store.append(kind);
        if let Some(block) = document.last() {
            self.flows.publish(EditorFlow::BlockAppended {
                block_id: block.id,
                document: document.clone(),
            });
        }
        document
    }

    /// Replace a block's text. Unknown ids are ignored.
    pub fn update_content(&mut self, id: &BlockId, content: impl Into<String>) -> DocumentSnapshot {
        let before = self.store.version();
        let document = self.store.update_content(id, content);
        if self.store.version() != before {
            self.flows.publish(EditorFlow::BlockContentUpdated {
                block_id: *id,
                document: document.clone(),
            });
        }
        document
    }

    // =========================================================================
    // Drag
    // =========================================================================

    pub fn drag_start(&mut self, index: usize) {
        tracing::debug!(index, "drag start");
        self.drag.start(index);
    }

    /// The dragged block's pointer entered the block at `index`.
    pub fn drag_hover(&mut self, index: usize) -> DocumentSnapshot {
        let mut target = Announcing {
            store: &mut self.store,
            flows: &self.flows,
        };
        self.drag.hover(index, &mut target);
        self.store.snapshot()
    }

    pub fn drag_end(&mut self) -> DragSummary {
        let summary = self.drag.end();
        tracing::debug!(commits = summary.commits, "drag dropped");
        summary
    }

    pub fn drag_cancel(&mut self) -> DragSummary {
        let summary = self.drag.cancel();
        tracing::debug!(commits = summary.commits, "drag cancelled");
        summary
    }

    // =========================================================================
    // Tags
    // =========================================================================

    /// Tag input changed.
    pub fn set_tag_input(&mut self, text: impl Into<String>) {
        self.tags.set_pending(text);
    }

    /// Tag submit action: add whatever is in the tag input.
    pub fn submit_tag(&mut self) -> TagSnapshot {
        let candidate = self.tags.pending().to_string();
        self.add_tag(&candidate)
    }

    pub fn add_tag(&mut self, candidate: &str) -> TagSnapshot {
        let before = self.tags.len();
        let tags = self.tags.add(candidate);
        if tags.len() != before {
            self.flows.publish(EditorFlow::TagAdded {
                tag: candidate.to_string(),
                tags: tags.clone(),
            });
        }
        tags
    }

    // =========================================================================
    // Free text
    // =========================================================================

    /// Raw input from the content-editable surface.
    pub fn text_input(&mut self, text: impl Into<String>) {
        if self.text.input(text) {
            self.flows.publish(EditorFlow::TextChanged {
                len: self.text.text().chars().count(),
            });
        }
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("id", &self.id)
            .field("document_id", &self.store.document_id())
            .field("blocks", &self.store.len())
            .field("tags", &self.tags.len())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
