//! Sublime Text keymap generator
//!
//! This crate provides a fluent builder for Sublime Text key bindings and
//! writes them out as deterministic `.sublime-keymap` JSON.

pub mod cli;
pub mod config_paths;
pub mod keymap;
pub mod tracing;

// Re-export commonly used types
pub use keymap::{
    bind, context, Binding, Condition, Context, JsonOptions, Keymap, KeymapError, KeymapOptions,
    MatchScope, Operator,
};
