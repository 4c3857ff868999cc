//! Generation configuration.
//!
//! A [`BridgeConfig`] describes one generation request: the wrapper name,
//! where artifacts land, and whether pin wiring is synthesized. Configs can
//! be built in code or loaded from a TOML file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("cannot read config at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML.
    #[error("cannot parse config: {0}")]
    Parse(String),
}

/// Options for one generation request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BridgeConfig {
    /// The wrapper/instance name. Defaults to the source module's name.
    pub name: Option<String>,
    /// Directory both artifacts are written to, and the directory the
    /// generated wrapper registers the HDL file from.
    pub output_dir: PathBuf,
    /// Whether to synthesize pin/pad wiring and emit the `autoconnect_pads`
    /// entry point.
    pub autoconnect_pads: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            name: None,
            output_dir: PathBuf::from("build"),
            autoconnect_pads: true,
        }
    }
}

impl BridgeConfig {
    /// Parses a configuration from a TOML string.
    ///
    /// Useful for testing without filesystem dependencies.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
