//! Free-text sink fed by the content-editable surface.
//!
//! Deliberately independent of the block list: raw input lands here and is
//! never parsed into blocks.

/// Latest raw text from the editable surface.
#[derive(Debug, Default)]
pub struct TextSink {
    text: String,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the buffer. Returns whether the text changed.
    pub fn input(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        true
    }
}
