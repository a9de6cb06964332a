//! Sublime Text data directory discovery
//!
//! Generated keymaps are installed into the `User` package:
//! - Linux: `~/.config/sublime-text/Packages/User/`
//! - macOS: `~/Library/Application Support/Sublime Text/Packages/User/`
//! - Windows: `%APPDATA%\Sublime Text\Packages\User\`
//!
//! `SUBLIME_DATA_DIR` overrides the data directory on every platform.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const DATA_DIR_ENV: &str = "SUBLIME_DATA_DIR";

#[cfg(target_os = "linux")]
const APP_DIR: &str = "sublime-text";
#[cfg(not(target_os = "linux"))]
const APP_DIR: &str = "Sublime Text";

/// Sublime Text's data directory
pub fn data_dir() -> Option<PathBuf> {
    env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|config| config.join(APP_DIR)))
}

/// `<data>/Packages/`
pub fn packages_dir() -> Option<PathBuf> {
    data_dir().map(|dir| dir.join("Packages"))
}

/// `<data>/Packages/User/`
pub fn user_package_dir() -> Option<PathBuf> {
    packages_dir().map(|dir| dir.join("User"))
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure the `User` package exists, returning it
pub fn ensure_user_package_dir() -> Result<PathBuf, String> {
    let dir = user_package_dir().ok_or_else(|| "No Sublime Text data directory".to_string())?;
    ensure_dir(&dir)?;
    tracing::debug!("User package ready at {}", dir.display());
    Ok(dir)
}
