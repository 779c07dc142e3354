//! Configuration management for Smart Desk.
//!
//! Loads configuration from ${DESK_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for Smart Desk configuration and data directories.
    //!
    //! DESK_HOME resolution order:
    //! 1. DESK_HOME environment variable (if set)
    //! 2. ~/.config/smart-desk (default)

    use std::path::PathBuf;

    /// Returns the Smart Desk home directory.
    pub fn desk_home() -> PathBuf {
        if let Ok(home) = std::env::var("DESK_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir().map_or_else(
            || PathBuf::from(".smart-desk"),
            |h| h.join(".config").join("smart-desk"),
        )
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        desk_home().join("config.toml")
    }

    /// Returns the directory holding named session files.
    pub fn sessions_dir() -> PathBuf {
        desk_home().join("sessions")
    }

    /// Returns the directory holding log files.
    pub fn logs_dir() -> PathBuf {
        desk_home().join("logs")
    }
}

/// Embedded config template (kept in sync with `Config::default()`).
pub fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint that receives registration POSTs.
    pub registration_url: String,

    /// Registration request timeout in seconds (0 disables)
    pub request_timeout_secs: u32,
}

impl Config {
    pub const DEFAULT_REGISTRATION_URL: &str = "http://localhost:3000/register";
    const DEFAULT_REQUEST_TIMEOUT_SECS: u32 = 30;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the default template to `path`.
    ///
    /// # Errors
    /// Fails if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(u64::from(self.request_timeout_secs)))
        }
    }

    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registration_url: Self::DEFAULT_REGISTRATION_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
