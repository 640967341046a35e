//! Platform-specific path utilities for the binstar CLI.

use std::path::PathBuf;

use crate::error::{BinstarError, Result};

/// Get the configuration directory for the binstar CLI.
///
/// - Linux: `~/.config/binstar`
/// - macOS: `~/Library/Application Support/binstar`
/// - Windows: `%APPDATA%\binstar`
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir()
        .ok_or_else(|| BinstarError::Config("Cannot determine config directory".to_string()))?;
    Ok(base.join("binstar"))
}

/// Get the main configuration file path.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
