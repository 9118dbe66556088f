//! Probe module.
//!
//! This module provides the network diagnostics and their orchestration:
//! - DNS resolution against a chosen server
//! - TCP port reachability checks
//! - Background launching with deadlines and exactly-once completion
//! - Core request and result types

pub mod dns;
pub mod launcher;
pub mod tcp;
pub mod types;

pub use dns::resolve_via_server;
pub use launcher::{run_request, Deadlines, NetworkProber, ProbeLauncher, Prober};
pub use tcp::check_tcp_port;
pub use types::*;
