//! Fluent builder for Sublime Text key binding files
//!
//! This module provides:
//! - `Binding`: keys mapped to a command, its arguments and guard conditions
//! - `Context`: a single guard condition (key, operator, operand, match scope)
//! - `Keymap`: an ordered set of bindings sharing common context and a default match scope
//! - Deterministic JSON output with a fixed attribute order
//!
//! # Architecture
//!
//! ```text
//! bind() → When → Binding → Keymap (copy, flatten, common context, default scope) → JSON
//! ```
//!
//! # Building a keymap
//!
//! ```
//! use sublime_keymap::keymap::{
//!     bind, context, Condition, JsonOptions, Keymap, KeymapOptions, MatchScope,
//! };
//!
//! # fn main() -> Result<(), sublime_keymap::keymap::KeymapError> {
//! let keymap = Keymap::with_options(
//!     KeymapOptions::new()
//!         .default_match_all(MatchScope::All)
//!         .common_context([context("selector").equal("text.asciidoc")]),
//!     [
//!         bind(["backspace"])?
//!             .to_with("run_macro_file", [("file", "res://Packages/User/Pair.sublime-macro")])
//!             .when("setting.auto_match_enabled").any().is_true()
//!             .also("preceding_text").regex_contains("_$")
//!             .also("following_text").regex_contains("^_"),
//!         bind(["super+k", "super+shift+up"])?.to_with("new_pane", [("move", false)]),
//!     ],
//! );
//!
//! let mut out = Vec::new();
//! keymap.write_to(&mut out, &JsonOptions::default())?;
//! # Ok(())
//! # }
//! ```

mod binding;
mod config;
mod context;
mod error;
mod json;
#[allow(clippy::module_inception)]
mod keymap;

pub use binding::{bind, Binding, When};
pub use config::{load_keymap_file, parse_keymap_yaml, KeymapDefinition, Platform};
pub use context::{context, Condition, Context, MatchScope, Operator};
pub use error::KeymapError;
pub use json::{to_json, JsonOptions, FILE_HEADER};
pub use keymap::{BindingSource, Keymap, KeymapOptions};
