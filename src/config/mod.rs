//! User settings loaded from `config.toml`.
//!
//! Every key is optional. Command-line flags take precedence over the file,
//! and the file takes precedence over built-in defaults.
//!
//! ```toml
//! home = "~"
//! recursive = 2
//! unlink_missing = "ignore"
//! ```
pub mod toml_loader;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::engine::MissingPolicy;
use crate::error::ConfigError;
use crate::resources::helpers::fs::home_dir;

/// Parsed `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory links are created in.
    pub home: Option<PathBuf>,
    /// Default recursion depth for nested templates.
    pub recursive: Option<usize>,
    /// How `unlink` treats targets that do not exist.
    pub unlink_missing: MissingPolicy,
}

impl Settings {
    /// Load settings.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, does not parse,
    /// or holds an invalid value.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let settings: Self = match path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::Io {
                        path: path.display().to_string(),
                        source: std::io::Error::from(std::io::ErrorKind::NotFound),
                    });
                }
                toml_loader::load_config(path)?
            }
            None => default_config_path()
                .map_or_else(|| Ok(Self::default()), |p| toml_loader::load_config(&p))?,
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.recursive == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "recursive".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/dot/config.toml`, falling back to
/// `~/.config/dot/config.toml`.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir().map(|h| h.join(".config")))?;
    Some(base.join("dot").join("config.toml"))
}

/// Whether an environment variable holds a truthy value (`true`, `t`, `1`).
#[must_use]
pub fn env_flag(key: &str) -> bool {
    std::env::var(key).is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "t" | "1")
}
