//! YAML keymap definitions
//!
//! A definition file describes one keymap the same way the builder does:
//!
//! ```yaml
//! name: Default
//! default_match_all: true
//! common_context:
//!   - { key: selector, operator: equal, operand: text.asciidoc }
//! bindings:
//!   - keys: [backspace]
//!     command: run_macro_file
//!     args: { file: "res://Packages/Default/Delete Left Right.sublime-macro" }
//!     context:
//!       - { key: preceding_text, operator: regex_contains, operand: "_$" }
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use super::binding::Binding;
use super::context::{Context, MatchScope};
use super::error::KeymapError;
use super::json::JsonOptions;
use super::keymap::{Keymap, KeymapOptions};

/// Platforms Sublime Text loads platform-specific keymaps for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    #[serde(alias = "macos")]
    Osx,
    Linux,
}

impl Platform {
    /// The platform this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Osx
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Windows => "Windows",
            Platform::Osx => "OSX",
            Platform::Linux => "Linux",
        })
    }
}

/// Root structure of a keymap definition file
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeymapDefinition {
    /// Stem of the generated file, e.g. `Default`
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub default_match_all: Option<MatchScope>,
    #[serde(default)]
    pub common_context: Vec<Context>,
    /// Layout of the generated JSON
    #[serde(default)]
    pub output: JsonOptions,
    pub bindings: Vec<Binding>,
}

impl KeymapDefinition {
    /// Build the keymap, applying common context and default match scope
    pub fn to_keymap(&self) -> Keymap {
        let options = KeymapOptions {
            default_match_all: self.default_match_all,
            common_context: self.common_context.clone(),
        };
        Keymap::with_options(options, self.bindings.as_slice())
    }

    /// File name Sublime Text expects, e.g. `Default (Linux).sublime-keymap`
    ///
    /// `fallback_stem` is used when the definition has no `name`.
    pub fn file_name(&self, fallback_stem: &str) -> String {
        let stem = self.name.as_deref().unwrap_or(fallback_stem);
        match self.platform {
            Some(platform) => format!("{} ({}).sublime-keymap", stem, platform),
            None => format!("{}.sublime-keymap", stem),
        }
    }
}

/// Load a keymap definition from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<KeymapDefinition, KeymapError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| KeymapError::Io(format!("{}: {}", path.display(), e)))?;

    let definition = parse_keymap_yaml(&content)?;
    tracing::info!(
        "Loaded keymap definition from {} ({} bindings)",
        path.display(),
        definition.bindings.len()
    );
    Ok(definition)
}

/// Parse a keymap definition from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<KeymapDefinition, KeymapError> {
    serde_yaml::from_str(yaml).map_err(|e| KeymapError::Parse(e.to_string()))
}
