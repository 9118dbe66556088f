//! Settings loader.
//!
//! This module provides functionality to load settings from JSON files,
//! the default config location, or command-line overrides.

use crate::config::settings::Settings;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Name of the settings file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Settings loader.
///
/// Provides methods to load settings and apply command-line overrides.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, cannot be parsed,
    /// or contains invalid values.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let settings = ConfigLoader::load_from_file("config.json")?;
    /// println!("DNS deadline: {}s", settings.dns_timeout_secs);
    /// ```
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default location.
    ///
    /// Reads `$CONFIG_DIR/netprobe/config.json`. A missing file yields the
    /// built-in defaults; a file that exists but is broken is an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the default file exists but cannot be loaded.
    pub fn load_default() -> Result<Settings> {
        let path = Self::config_dir().join(CONFIG_FILE_NAME);
        if !path.exists() {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            return Ok(Settings::default());
        }
        Self::load_from_file(&path)
    }

    /// Load settings from `path` if given, otherwise from the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Settings> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Self::load_default(),
        }
    }

    /// Get the config directory path.
    #[must_use]
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("netprobe")
    }

    /// Override the DNS servers from command-line arguments.
    ///
    /// Each argument is an IP address, optionally with a port. One argument
    /// replaces the first slot only, two replace both; more are rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if there are more than two servers or an address is invalid.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let args = vec!["9.9.9.9".to_string(), "1.0.0.1".to_string()];
    /// let settings = ConfigLoader::with_servers(Settings::default(), &args)?;
    /// ```
    pub fn with_servers(mut settings: Settings, servers: &[String]) -> Result<Settings> {
        if servers.len() > settings.dns_servers.len() {
            return Err(Error::Parse(format!(
                "At most {} DNS servers can be given, got {}",
                settings.dns_servers.len(),
                servers.len()
            )));
        }
        for (slot, server) in settings.dns_servers.iter_mut().zip(servers) {
            *slot = server.trim().to_string();
        }
        settings.validate()?;
        Ok(settings)
    }
}
