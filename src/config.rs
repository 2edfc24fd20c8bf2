//! Calculator configuration.
//!
//! Read from `config.toml` in the platform config directory
//! (`~/.config/calci/config.toml` on Linux) unless a path is given.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::controller::DEFAULT_ERROR_MARKER;

const APP_DIR: &str = "calci";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalciConfig {
    /// How long the error marker stays up before the display clears.
    pub flash_delay_ms: u64,
    /// Text shown when a computation fails.
    pub error_marker: String,
}

impl Default for CalciConfig {
    fn default() -> Self {
        Self {
            flash_delay_ms: 800,
            error_marker: DEFAULT_ERROR_MARKER.to_string(),
        }
    }
}

impl CalciConfig {
    pub fn flash_delay(&self) -> Duration {
        Duration::from_millis(self.flash_delay_ms)
    }

    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields the defaults; a file that cannot be read or
    /// parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            tracing::debug!("No config directory available, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
