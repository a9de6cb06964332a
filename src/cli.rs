//! Command-line driver for the keymap generator
//!
//! Supports:
//! - Writing next to the definition, to a chosen file, or to stdout
//! - Installing into Sublime Text's User package
//! - Overriding the JSON layout of the definition file

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;

use crate::config_paths;
use crate::keymap::{load_keymap_file, JsonOptions, KeymapDefinition};

/// Generate Sublime Text key binding files
#[derive(Parser, Debug)]
#[command(
    name = "sublime-keymap",
    version,
    about = "Generate Sublime Text key binding files"
)]
pub struct CliArgs {
    /// YAML keymap definition
    #[arg(value_name = "DEFINITION")]
    pub definition: PathBuf,

    /// Write the keymap to FILE
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["stdout", "install"])]
    pub output: Option<PathBuf>,

    /// Write the keymap to standard output
    #[arg(long, conflicts_with = "install")]
    pub stdout: bool,

    /// Write the keymap into Sublime Text's User package
    #[arg(long)]
    pub install: bool,

    /// Indent JSON by N spaces per level
    #[arg(long, value_name = "N", conflicts_with = "compact")]
    pub indent: Option<usize>,

    /// Write the JSON on a single line
    #[arg(long)]
    pub compact: bool,

    /// Escape non-ASCII characters as \uXXXX
    #[arg(long, conflicts_with = "utf8")]
    pub ascii: bool,

    /// Write non-ASCII characters as raw UTF-8
    #[arg(long)]
    pub utf8: bool,
}

/// Where the generated keymap goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Next to the definition file, named after the keymap
    BesideDefinition,
    /// An explicit file
    File(PathBuf),
    /// Sublime Text's `Packages/User` directory
    UserPackage,
    Stdout,
}

/// JSON layout requested on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Use the definition's `output` section
    FromDefinition,
    Indent(usize),
    Compact,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub definition: PathBuf,
    pub destination: Destination,
    pub layout: Layout,
    /// `None` keeps the definition's setting
    pub ensure_ascii: Option<bool>,
}

impl CliArgs {
    /// Convert parsed CLI args into generator configuration
    pub fn into_config(self) -> Result<GenerateConfig, String> {
        if self.definition.is_dir() {
            return Err(format!(
                "Expected a keymap definition file, got directory {}",
                self.definition.display()
            ));
        }

        let destination = if self.stdout {
            Destination::Stdout
        } else if self.install {
            Destination::UserPackage
        } else if let Some(output) = self.output {
            Destination::File(output)
        } else {
            Destination::BesideDefinition
        };

        let layout = match (self.compact, self.indent) {
            (true, _) => Layout::Compact,
            (false, Some(indent)) => Layout::Indent(indent),
            (false, None) => Layout::FromDefinition,
        };

        Ok(GenerateConfig {
            definition: self.definition,
            destination,
            layout,
            ensure_ascii: match (self.ascii, self.utf8) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            },
        })
    }
}

impl GenerateConfig {
    /// Layered JSON options: definition file first, then CLI flags
    pub fn json_options(&self, from_definition: &JsonOptions) -> JsonOptions {
        let mut options = from_definition.clone();
        match self.layout {
            Layout::FromDefinition => {}
            Layout::Indent(indent) => options.indent = Some(indent),
            Layout::Compact => options.indent = None,
        }
        if let Some(ensure_ascii) = self.ensure_ascii {
            options.ensure_ascii = ensure_ascii;
        }
        options
    }

    /// Target file, or `None` for stdout
    pub fn output_path(&self, definition: &KeymapDefinition) -> Result<Option<PathBuf>> {
        let fallback_stem = self
            .definition
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Default");
        let file_name = definition.file_name(fallback_stem);

        let path = match &self.destination {
            Destination::Stdout => return Ok(None),
            Destination::File(path) => path.clone(),
            Destination::BesideDefinition => self
                .definition
                .parent()
                .map(|dir| dir.join(&file_name))
                .unwrap_or_else(|| PathBuf::from(&file_name)),
            Destination::UserPackage => config_paths::ensure_user_package_dir()
                .map_err(anyhow::Error::msg)?
                .join(&file_name),
        };
        Ok(Some(path))
    }
}

/// Load the definition, build the keymap and write it out
///
/// Returns the written file, or `None` when the keymap went to stdout.
pub fn generate(config: &GenerateConfig) -> Result<Option<PathBuf>> {
    let definition = load_keymap_file(&config.definition).with_context(|| {
        format!(
            "Failed to load keymap definition {}",
            config.definition.display()
        )
    })?;

    let keymap = definition.to_keymap();
    let options = config.json_options(&definition.output);

    let Some(path) = config.output_path(&definition)? else {
        let stdout = io::stdout();
        keymap.write_to(&mut stdout.lock(), &options)?;
        return Ok(None);
    };

    let mut file = fs::File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    keymap
        .write_to(&mut file, &options)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!("Wrote {} bindings to {}", keymap.len(), path.display());
    Ok(Some(path))
}
