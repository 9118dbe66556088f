//! Error types module.
//!
//! This module defines the error types used throughout the netprobe application.
//! Probe failures are not errors: they travel as data inside probe results.
//! The variants here cover the things that can stop the program itself
//! (terminal I/O, broken configuration, bad command-line input).

use thiserror::Error;

/// A specialized `Result` type for netprobe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the netprobe application.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (terminal, log file, configuration file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error (configuration files, JSON output)
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (invalid settings, unreadable file)
    #[error("Config error: {0}")]
    Config(String),

    /// TUI (terminal UI) related error
    #[error("TUI error: {0}")]
    Tui(String),

    /// Parse error (invalid server address, malformed argument)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Create a new configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new parse error with a message.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a new TUI error with a message.
    #[must_use]
    pub fn tui(msg: impl Into<String>) -> Self {
        Self::Tui(msg.into())
    }
}

impl From<color_eyre::Report> for Error {
    fn from(e: color_eyre::Report) -> Self {
        Self::Config(e.to_string())
    }
}
