//! Editor configuration, loadable from RON.
//!
//! Every field has a default, so an empty file (`()`) is a valid config:
//!
//! ```ron
//! (
//!     seed_text: "Start writing...",
//!     seed_kind: heading1,
//!     flow_capacity: 64,
//! )
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use blockpad_types::BlockKind;

use crate::error::ConfigError;

/// Placeholder text of the block every new document starts with.
pub const DEFAULT_SEED_TEXT: &str = "Welcome to your Notion-like editor!";

/// Default FlowBus channel capacity.
pub const DEFAULT_FLOW_CAPACITY: usize = 256;

/// Session-wide editor settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Content of the seed block.
    pub seed_text: String,
    /// Kind of the seed block.
    pub seed_kind: BlockKind,
    /// How many flow events a slow subscriber may fall behind before it lags.
    pub flow_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            seed_text: DEFAULT_SEED_TEXT.to_string(),
            seed_kind: BlockKind::Paragraph,
            flow_capacity: DEFAULT_FLOW_CAPACITY,
        }
    }
}

impl EditorConfig {
    /// Parse a config from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded editor config");
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // broadcast channels cannot have zero capacity
        if self.flow_capacity == 0 {
            return Err(ConfigError::Invalid("flow_capacity must be at least 1".into()));
        }
        Ok(())
    }
}
