//! Errors raised while building, loading or writing keymaps

use thiserror::Error;

/// Errors that can occur when building or emitting a keymap
#[derive(Debug, Error)]
pub enum KeymapError {
    /// A binding was created without any key combination
    #[error("Invalid binding: at least one key is required")]
    InvalidBinding,

    /// A comparison was requested with an operator Sublime Text doesn't know
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// The destination refused the generated keymap
    #[error("Write error: {0}")]
    Write(#[from] std::io::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A keymap definition or generated keymap could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}
