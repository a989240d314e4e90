use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::parser::tabular::DEFAULT_SEPARATOR_LINES;

/// Default log level when neither `PKGTABLE_LOG` nor the config file sets one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV_VAR: &str = "PKGTABLE_LOG";

/// Configuration file structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub decoder: DecoderConfig,
    pub log: LogConfig,
}

/// Table decoding configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DecoderConfig {
    /// Lines between the header and the first row (the `----` rule)
    pub separator_lines: usize,
    /// Locale tried after the invariant and process locales when parsing numbers
    pub default_locale: Option<String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            separator_lines: DEFAULT_SEPARATOR_LINES,
            default_locale: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LogConfig {
    pub level: String,
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
            json: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Returns the path to the config directory for pkgtable.
/// Uses $XDG_CONFIG_HOME/pkgtable if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/pkgtable,
/// or ./pkgtable if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("pkgtable")
}

/// Load the config file at `path`, using defaults when it does not exist
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
