//! Block document model for Blockpad.
//!
//! A document is an ordered sequence of typed blocks plus a set of tags.
//! All state lives in memory for the duration of one [`EditorSession`].
//!
//! # Design Philosophy
//!
//! - **Snapshots, not mutation**: every change produces a new immutable
//!   [`Snapshot`]; holders of an older one are never surprised.
//! - **Silence over signaling**: unknown ids, empty or duplicate tags and
//!   same-index reorders are no-ops, never errors.
//! - **Live drag commits**: reorders happen while hovering, not on drop.
//! - **Explicit notification**: the [`FlowBus`] announces each effective
//!   change with the snapshot it produced.
//!
//! # Components
//!
//! - [`BlockStore`]: ordered blocks; append, content update, reorder
//! - [`DragReorderController`]: drag start/hover/end → reorder
//! - [`TagSet`]: insertion-ordered, duplicate-free labels
//! - [`TextSink`]: free text from the editable surface, separate from blocks
//! - [`EditorSession`]: owns one of each and wires them together

mod block_store;
mod config;
mod drag;
mod error;
pub mod flows;
mod session;
mod snapshot;
mod tags;
mod text;

pub use block_store::BlockStore;
pub use config::{EditorConfig, DEFAULT_FLOW_CAPACITY, DEFAULT_SEED_TEXT};
pub use drag::{DragReorderController, DragState, DragSummary, ReorderTarget};
pub use error::ConfigError;
pub use flows::{EditorFlow, FlowBus, FlowMessage, HasSubject, Subscription};
pub use session::{EditorSession, SessionSnapshot};
pub use snapshot::{DocumentSnapshot, Snapshot, TagSnapshot};
pub use tags::TagSet;
pub use text::TextSink;

pub use blockpad_types::{Block, BlockId, BlockKind, DocumentId, SessionId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_reorder_and_tag_round() {
        let mut session = EditorSession::default();

        session.append(BlockKind::Heading1);
        session.append(BlockKind::Code);
        let heading = session.document()[1].id;
        session.update_content(&heading, "Title");

        session.drag_start(1);
        session.drag_hover(0);
        session.drag_end();

        let doc = session.document();
        assert_eq!(doc[0].kind, BlockKind::Heading1);
        assert_eq!(doc[0].content, "Title");
        assert_eq!(doc[1].kind, BlockKind::Paragraph);
        assert_eq!(doc[2].kind, BlockKind::Code);

        session.set_tag_input("draft");
        session.submit_tag();
        session.add_tag("draft");
        assert_eq!(&session.tags()[..], ["draft".to_string()]);
    }

    #[test]
    fn test_unknown_kind_renders_as_paragraph() {
        let kind = BlockKind::parse_or_paragraph("callout");
        assert_eq!(kind.render_hint(), "p");
    }
}
