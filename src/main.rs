use anyhow::Result;
use clap::Parser;

use sublime_keymap::cli::{generate, CliArgs};

fn main() -> Result<()> {
    sublime_keymap::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    if let Some(path) = generate(&config)? {
        eprintln!("Generated {}", path.display());
    }
    Ok(())
}
