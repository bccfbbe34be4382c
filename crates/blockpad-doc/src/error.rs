//! Error types.
//!
//! Document operations never fail: degenerate input is a silent no-op. The
//! only fallible surface is loading configuration.

use thiserror::Error;

/// Errors that can occur while loading an [`EditorConfig`](crate::EditorConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid RON for an `EditorConfig`.
    #[error("RON parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// A field parsed but holds a value the editor cannot run with.
    #[error("invalid config: {0}")]
    Invalid(String),
}
