//! TOML configuration file parsing.
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ConfigError;

/// Deserialize a TOML file, treating a missing file as an empty document.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, and
/// [`ConfigError::InvalidSyntax`] if it does not parse into `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return parse("", path);
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content, path)
}

fn parse<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
        path: path.display().to_string(),
        message: e.message().to_string(),
    })
}
