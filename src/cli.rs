//! Command-line interface (CLI) argument parsing module.
//!
//! This module provides CLI argument parsing using `clap`.
//! Without a subcommand the interactive TUI starts; `dns` and `port`
//! run a single probe and print the result.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI argument parser using clap derive macro.
///
/// # Example
///
/// ```ignore
/// let cli = Cli::parse();
/// match cli.command {
///     Some(Commands::Dns { name, .. }) => { /* ... */ }
///     Some(Commands::Port { host, port }) => { /* ... */ }
///     _ => { /* interactive mode */ }
/// }
/// ```
#[derive(Parser, Debug)]
#[command(
    name = "netprobe",
    version,
    about = "Dual-server DNS lookups and TCP port checks",
    long_about = "Interactive terminal tool that resolves a name against two DNS servers \
                  side by side and checks whether a TCP port accepts connections",
    infer_subcommands = true
)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (only errors)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for one-shot commands
    #[arg(long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Settings file (JSON format)
    #[arg(short, long, global = true, env = "NETPROBE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write logs of the interactive mode to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for one-shot commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format (default, human-readable)
    #[default]
    Table,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Get all available output format names.
    #[must_use]
    pub fn names() -> &'static [&'static str] {
        &["table", "json"]
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Unknown format: {}. Valid options are: {:?}",
                s,
                Self::names()
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Available commands for the netprobe CLI.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal user interface (default).
    #[command(alias = "i")]
    Interactive,

    /// Resolve a name against two DNS servers.
    ///
    /// Both servers are queried concurrently; results are printed in
    /// server order.
    #[command(alias = "d")]
    Dns {
        /// Hostname to resolve
        name: String,

        /// DNS server (IP or IP:port); give once or twice to override the defaults
        #[arg(short, long = "server")]
        servers: Vec<String>,
    },

    /// Check whether a TCP port accepts connections.
    #[command(alias = "p")]
    Port {
        /// Target host name or address
        host: String,

        /// Target port
        port: String,
    },
}

/// Parse CLI arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
