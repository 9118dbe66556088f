//! netprobe - Dual-server DNS lookups and TCP port checks in the terminal.
//!
//! This crate provides both a library API and a CLI tool for:
//! - Resolving a name against two chosen DNS servers concurrently
//! - Checking whether a TCP port accepts connections
//! - An interactive split-pane TUI where probes run in the background
//!
//! # Library Usage
//!
//! ```ignore
//! use netprobe::probe::{check_tcp_port, resolve_via_server};
//! use std::time::Duration;
//!
//! let answer = resolve_via_server("1.1.1.1", "example.com", Duration::from_secs(10)).await;
//! let port = check_tcp_port("example.com", "443", Duration::from_secs(5)).await;
//! ```
//!
//! # CLI Usage
//!
//! ```bash
//! # Interactive TUI mode (default)
//! netprobe
//!
//! # One-shot DNS lookup against the configured servers
//! netprobe dns example.com
//! netprobe dns example.com --server 9.9.9.9 --server 1.0.0.1
//!
//! # One-shot port check
//! netprobe port example.com 443 --format json
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod probe;
pub mod tui;

// Re-export commonly used types
pub use cli::{Cli, Commands, OutputFormat};
pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use probe::{
    DnsLookupResult, DnsServerResult, NetworkProber, PortCheckResult, ProbeLauncher,
    ProbeRequest, Prober,
};
pub use tui::App;
