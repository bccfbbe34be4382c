//! Block identity, kinds, and the immutable block value.
//!
//! ## Design: a closed BlockKind
//!
//! `BlockKind` is the registry of everything a block can be — seven variants,
//! no extension points. The document model treats the kind as an opaque tag
//! (equality + storage); only renderers interpret it, through
//! [`BlockKind::render_hint`]. Anything that arrives at the boundary as an
//! unrecognised string is rendered as a paragraph ([`BlockKind::parse_or_paragraph`]).

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::ids::DocumentId;

/// Unique block identifier.
///
/// Composed of:
/// - `document_id`: The document this block belongs to
/// - `seq`: Store-local sequence number (strictly increasing, never reused)
///
/// Two appends in the same clock tick still get different `seq` values, so
/// ids can never collide the way wall-clock ids do.
#[derive(Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct BlockId {
    /// Document this block belongs to.
    pub document_id: DocumentId,
    /// Store-local sequence number.
    pub seq: u64,
}

impl BlockId {
    /// Create a new block ID from its components.
    pub fn new(document_id: DocumentId, seq: u64) -> Self {
        Self { document_id, seq }
    }

    /// Convert to a compact string key: `"{document_hex}:{seq}"`.
    pub fn to_key(&self) -> String {
        format!("{}:{}", self.document_id.to_hex(), self.seq)
    }

    /// Parse from key string: `"{document_hex}:{seq}"`.
    pub fn from_key(key: &str) -> Option<Self> {
        let (doc, seq) = key.split_once(':')?;
        let document_id = DocumentId::parse(doc).ok()?;
        let seq: u64 = seq.parse().ok()?;
        Some(Self { document_id, seq })
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.document_id.short(), self.seq)
    }
}

impl std::fmt::Debug for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockId({}#{})", self.document_id.short(), self.seq)
    }
}

/// What a block is.
///
/// Serialized names follow the editor's wire tags (`heading1`,
/// `orderedList`, ...). Deserialization also takes the short aliases (`h1`,
/// `ordered_list`, ...), so config files and scripts can use either.
/// [`BlockKind::from_str`] additionally ignores ASCII case.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum BlockKind {
    /// Plain paragraph text.
    #[default]
    #[serde(rename = "paragraph", alias = "p")]
    #[strum(serialize = "paragraph", serialize = "p")]
    Paragraph,
    /// Top-level heading.
    #[serde(rename = "heading1", alias = "h1")]
    #[strum(serialize = "heading1", serialize = "h1")]
    Heading1,
    /// Second-level heading.
    #[serde(rename = "heading2", alias = "h2")]
    #[strum(serialize = "heading2", serialize = "h2")]
    Heading2,
    /// Third-level heading.
    #[serde(rename = "heading3", alias = "h3")]
    #[strum(serialize = "heading3", serialize = "h3")]
    Heading3,
    /// Preformatted code.
    #[serde(rename = "code")]
    #[strum(serialize = "code")]
    Code,
    /// A numbered list item.
    #[serde(rename = "orderedList", alias = "ordered_list")]
    #[strum(serialize = "orderedList", serialize = "ordered_list")]
    OrderedListItem,
    /// A bulleted list item.
    #[serde(rename = "unorderedList", alias = "unordered_list")]
    #[strum(serialize = "unorderedList", serialize = "unordered_list")]
    UnorderedListItem,
}

impl BlockKind {
    /// Every kind, in toolbar order.
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Paragraph,
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::Code,
        BlockKind::OrderedListItem,
        BlockKind::UnorderedListItem,
    ];

    /// The append commands a toolbar offers, one per kind.
    pub fn toolbar() -> &'static [BlockKind] {
        &Self::ALL
    }

    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Parse a kind tag at the rendering boundary.
    ///
    /// Unknown tags render as paragraphs.
    pub fn parse_or_paragraph(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            tracing::warn!(tag = s, "unknown block kind, rendering as paragraph");
            BlockKind::Paragraph
        })
    }

    /// Convert to string representation (the wire tag).
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading1 => "heading1",
            BlockKind::Heading2 => "heading2",
            BlockKind::Heading3 => "heading3",
            BlockKind::Code => "code",
            BlockKind::OrderedListItem => "orderedList",
            BlockKind::UnorderedListItem => "unorderedList",
        }
    }

    /// Element a renderer should wrap this block's content in.
    pub fn render_hint(&self) -> &'static str {
        match self {
            BlockKind::Paragraph => "p",
            BlockKind::Heading1 => "h1",
            BlockKind::Heading2 => "h2",
            BlockKind::Heading3 => "h3",
            BlockKind::Code => "pre",
            BlockKind::OrderedListItem => "ol",
            BlockKind::UnorderedListItem => "ul",
        }
    }

    /// Content a freshly appended block of this kind starts with.
    pub fn default_content(&self) -> &'static str {
        ""
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single content unit: immutable value, replaced wholesale on update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    pub content: String,
}

impl Block {
    /// A new block with the kind's default content.
    pub fn empty(id: BlockId, kind: BlockKind) -> Self {
        Self {
            id,
            kind,
            content: kind.default_content().to_string(),
        }
    }

    /// A new block with the given content.
    pub fn with_content(id: BlockId, kind: BlockKind, content: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
        }
    }

    /// Copy of this block with its content replaced.
    pub fn replace_content(&self, content: impl Into<String>) -> Self {
        Self {
            id: self.id,
            kind: self.kind,
            content: content.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_doc() -> DocumentId {
        DocumentId::new()
    }

    #[test]
    fn test_block_id_key_roundtrip() {
        let id = BlockId::new(test_doc(), 42);
        let key = id.to_key();
        assert!(key.ends_with(":42"));
        assert_eq!(BlockId::from_key(&key), Some(id));
    }

    #[test]
    fn test_block_id_from_key_rejects_bad_input() {
        assert_eq!(BlockId::from_key(""), None);
        assert_eq!(BlockId::from_key("nocolon"), None);
        assert_eq!(BlockId::from_key("zz:1"), None);
        let doc = test_doc();
        assert_eq!(BlockId::from_key(&format!("{}:x", doc.to_hex())), None);
    }

    #[test]
    fn test_block_id_equality_and_order() {
        let doc = test_doc();
        assert_eq!(BlockId::new(doc, 1), BlockId::new(doc, 1));
        assert_ne!(BlockId::new(doc, 1), BlockId::new(doc, 2));
        assert!(BlockId::new(doc, 1) < BlockId::new(doc, 2));
    }

    #[test]
    fn test_block_id_display() {
        let doc = test_doc();
        let id = BlockId::new(doc, 7);
        assert_eq!(id.to_string(), format!("{}#7", doc.short()));
        assert_eq!(format!("{id:?}"), format!("BlockId({}#7)", doc.short()));
    }

    #[test]
    fn test_kind_wire_tags() {
        for kind in BlockKind::ALL {
            assert_eq!(BlockKind::from_str(kind.as_str()), Some(kind));
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_kind_parse_aliases() {
        assert_eq!(BlockKind::from_str("HEADING1"), Some(BlockKind::Heading1));
        assert_eq!(BlockKind::from_str("h3"), Some(BlockKind::Heading3));
        assert_eq!(BlockKind::from_str("orderedlist"), Some(BlockKind::OrderedListItem));
        assert_eq!(
            BlockKind::from_str("unordered_list"),
            Some(BlockKind::UnorderedListItem)
        );
        assert_eq!(BlockKind::from_str("table"), None);
    }

    #[test]
    fn test_unknown_kind_falls_back_to_paragraph() {
        assert_eq!(BlockKind::parse_or_paragraph("table"), BlockKind::Paragraph);
        assert_eq!(BlockKind::parse_or_paragraph(""), BlockKind::Paragraph);
        assert_eq!(BlockKind::parse_or_paragraph("code"), BlockKind::Code);
    }

    #[test]
    fn test_render_hints_are_distinct() {
        let mut hints: Vec<_> = BlockKind::ALL.iter().map(|k| k.render_hint()).collect();
        hints.sort();
        hints.dedup();
        assert_eq!(hints.len(), 7);
        assert_eq!(BlockKind::Code.render_hint(), "pre");
    }

    #[test]
    fn test_toolbar_order() {
        let toolbar = BlockKind::toolbar();
        assert_eq!(toolbar.len(), 7);
        assert_eq!(toolbar[0], BlockKind::Paragraph);
        assert_eq!(toolbar[6], BlockKind::UnorderedListItem);
    }

    #[test]
    fn test_kind_deserializes_short_aliases() {
        let parse = |s: &str| serde_json::from_str::<BlockKind>(&format!("\"{s}\"")).unwrap();
        assert_eq!(parse("p"), BlockKind::Paragraph);
        assert_eq!(parse("h1"), BlockKind::Heading1);
        assert_eq!(parse("h3"), BlockKind::Heading3);
        assert_eq!(parse("ordered_list"), BlockKind::OrderedListItem);
        assert_eq!(parse("unordered_list"), BlockKind::UnorderedListItem);
        // Serialization still emits the wire tag
        assert_eq!(serde_json::to_string(&parse("h2")).unwrap(), "\"heading2\"");
        // Case folding is a from_str feature only
        assert!(serde_json::from_str::<BlockKind>("\"H1\"").is_err());
    }

    #[test]
    fn test_block_replace_content_keeps_identity() {
        let block = Block::empty(BlockId::new(test_doc(), 0), BlockKind::Code);
        assert_eq!(block.content, "");
        let edited = block.replace_content("fn main() {}");
        assert_eq!(edited.id, block.id);
        assert_eq!(edited.kind, BlockKind::Code);
        assert_eq!(edited.content, "fn main() {}");
        // Original untouched
        assert_eq!(block.content, "");
    }
}
