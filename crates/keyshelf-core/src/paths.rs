//! Path resolution utilities.

use crate::env;
use crate::error::ConfigError;
use std::path::PathBuf;

/// Get the Keyshelf base directory (~/.keyshelf).
pub fn base_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or_else(|| {
        ConfigError::Validation("Could not determine home directory".to_string())
    })?;
    Ok(home.join(".keyshelf"))
}

/// Get the config file path.
///
/// `KEYSHELF_CONFIG` wins over the default `~/.keyshelf/keyshelf.json5`.
pub fn config_file() -> Result<PathBuf, ConfigError> {
    if let Some(path) = env::get_var(env::vars::CONFIG) {
        return Ok(PathBuf::from(path));
    }
    Ok(base_dir()?.join("keyshelf.json5"))
}
