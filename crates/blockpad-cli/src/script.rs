//! RON event scripts.
//!
//! A script is a list of UI events replayed in order against a session:
//!
//! ```ron
//! [
//!     Append(heading1),
//!     Edit(index: 1, text: "Title"),
//!     DragStart(1),
//!     DragHover(0),
//!     DragEnd,
//!     TagInput("draft"),
//!     SubmitTag,
//!     TextInput("scratch"),
//! ]
//! ```

use serde::Deserialize;

use blockpad_doc::{BlockKind, EditorSession};

/// One UI event.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub enum ScriptEvent {
    /// Toolbar button for a block kind.
    Append(BlockKind),
    /// Replace the text of the block currently at `index`.
    Edit { index: usize, text: String },
    DragStart(usize),
    DragHover(usize),
    DragEnd,
    DragCancel,
    /// Tag input field changed.
    TagInput(String),
    /// Tag submit button.
    SubmitTag,
    /// Content-editable surface input.
    TextInput(String),
}

/// Parse a script from RON text.
pub fn parse(text: &str) -> Result<Vec<ScriptEvent>, ron::error::SpannedError> {
    ron::from_str(text)
}

/// Apply every event to `session`, in order.
pub fn replay(session: &mut EditorSession, events: &[ScriptEvent]) {
    for (step, event) in events.iter().enumerate() {
        tracing::debug!(step, ?event, "replaying");
        match event {
            ScriptEvent::Append(kind) => {
                session.append(*kind);
            }
            ScriptEvent::Edit { index, text } => {
                let Some(id) = session.document().get(*index).map(|b| b.id) else {
                    tracing::warn!(step, index, "edit targets a block that does not exist, skipped");
                    continue;
                };
                session.update_content(&id, text.as_str());
            }
            ScriptEvent::DragStart(index) => session.drag_start(*index),
            ScriptEvent::DragHover(index) => {
                session.drag_hover(*index);
            }
            ScriptEvent::DragEnd => {
                session.drag_end();
            }
            ScriptEvent::DragCancel => {
                session.drag_cancel();
            }
            ScriptEvent::TagInput(text) => session.set_tag_input(text.as_str()),
            ScriptEvent::SubmitTag => {
                session.submit_tag();
            }
            ScriptEvent::TextInput(text) => session.text_input(text.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"[
        Append(heading1),
        Append(code),
        Edit(index: 1, text: "Title"),
        DragStart(2),
        DragHover(0),
        DragEnd,
        TagInput("draft"),
        SubmitTag,
        TagInput("draft"),
        SubmitTag,
        TextInput("scratch"),
    ]"#;

    #[test]
    fn test_parse_script() {
        let events = parse(SCRIPT).unwrap();
        assert_eq!(events.len(), 11);
        assert_eq!(events[0], ScriptEvent::Append(BlockKind::Heading1));
        assert_eq!(
            events[2],
            ScriptEvent::Edit {
                index: 1,
                text: "Title".into()
            }
        );
        assert_eq!(events[5], ScriptEvent::DragEnd);
    }

    #[test]
    fn test_parse_short_kind_aliases() {
        let events = parse("[Append(h1), Append(ordered_list), Append(p)]").unwrap();
        assert_eq!(
            events,
            vec![
                ScriptEvent::Append(BlockKind::Heading1),
                ScriptEvent::Append(BlockKind::OrderedListItem),
                ScriptEvent::Append(BlockKind::Paragraph),
            ]
        );
    }

    #[test]
    fn test_parse_rejects_unknown_kind() {
        assert!(parse("[Append(table)]").is_err());
    }

    #[test]
    fn test_replay_script() {
        let mut session = EditorSession::default();
        replay(&mut session, &parse(SCRIPT).unwrap());

        let doc = session.document();
        let kinds: Vec<_> = doc.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Code, BlockKind::Paragraph, BlockKind::Heading1]
        );
        assert_eq!(doc[2].content, "Title");
        assert_eq!(&session.tags()[..], ["draft".to_string()]);
        // Second submit was a duplicate, so the input keeps its text
        assert_eq!(session.pending_tag(), "draft");
        assert_eq!(session.text(), "scratch");
    }

    #[test]
    fn test_edit_out_of_range_is_skipped() {
        let mut session = EditorSession::default();
        let before = session.document();
        replay(
            &mut session,
            &[ScriptEvent::Edit {
                index: 3,
                text: "nowhere".into(),
            }],
        );
        assert!(session.document().ptr_eq(&before));
    }
}
