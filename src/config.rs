//! Configuration file support
//!
//! Settings are read from `.hllines.toml` in the working directory, or from a
//! path given with `--config`.
//!
//! ```toml
//! marker = ">"
//! line_numbers = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = ".hllines.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", config_path.display())]
    NotFound { config_path: PathBuf },

    #[error("failed to read config file at {}: {source}", config_path.display())]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {}: {source}", config_path.display())]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Gutter mark `hlview` prints beside highlighted lines.
    pub marker: String,
    /// Whether `hlview` prints document line numbers.
    pub line_numbers: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker: ">".to_string(),
            line_numbers: true,
        }
    }
}

impl Config {
    /// Load a config file, or `None` when it does not exist.
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    /// Load an explicitly requested file (which must exist), else the default
    /// file if present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path)?.ok_or_else(|| ConfigError::NotFound {
                config_path: path.to_path_buf(),
            }),
            None => Ok(Self::load_from_path(DEFAULT_CONFIG_FILE)?.unwrap_or_default()),
        }
    }

    /// Gutter text for a line, padded so plain lines align with marked ones.
    pub fn gutter(&self, highlighted: bool) -> String {
        if highlighted {
            self.marker.clone()
        } else {
            " ".repeat(self.marker.chars().count())
        }
    }
}
