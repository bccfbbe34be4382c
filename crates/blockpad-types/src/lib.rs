//! Shared identity and block types for Blockpad.
//!
//! This crate is the vocabulary every other crate speaks: typed IDs, the
//! closed set of block kinds, and the immutable [`Block`] value. It has **no
//! internal blockpad dependencies** — a pure leaf crate.
//!
//! # Relationships
//!
//! ```text
//! Session (SessionId) ← one editing session, in-memory only
//!     └── owns Document (DocumentId)
//!             └── ordered Blocks (BlockId = DocumentId + seq)
//!                     └── kind: BlockKind (7 fixed variants)
//! ```
//!
//! # Key Types
//!
//! |-------------------|----------------------------------------------|
//! | Type              | Purpose                                      |
//! |-------------------|----------------------------------------------|
//! | [`DocumentId`]    | Which document                               |
//! | [`SessionId`]     | Which editing session                        |
//! | [`BlockId`]       | Unique block address (document + seq)        |
//! | [`BlockKind`]     | Paragraph, headings, code, list items        |
//! | [`Block`]         | Immutable block value (id + kind + content)  |
//! |-------------------|----------------------------------------------|

pub mod block;
pub mod ids;

pub use block::{Block, BlockId, BlockKind};
pub use ids::{DocumentId, SessionId};
