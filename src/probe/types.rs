//! Probe types and data structures.
//!
//! Requests describe one probe invocation, results carry its outcome.
//! Both are plain immutable values: a request is built once on submit and
//! consumed by the launcher, a result is produced once by a probe function.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a launched request.
///
/// Allocated by the application from a monotonic counter so that a
/// completion can be matched against the request a screen is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Screen that owns a probe request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    /// Dual-server DNS lookup
    Dns,
    /// Single-target TCP port check
    Port,
}

/// One probe invocation, captured from the form at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProbeRequest {
    /// Resolve `name` against both `servers`, slot order preserved.
    Dns {
        /// Resolver addresses, slot 0 first
        servers: [String; 2],
        /// Hostname to resolve
        name: String,
    },
    /// Open a TCP connection to `host:port`.
    Port {
        /// Target host name or address
        host: String,
        /// Target port as typed by the user
        port: String,
    },
}

impl ProbeRequest {
    /// Create a DNS lookup request.
    pub fn dns(
        server1: impl Into<String>,
        server2: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::Dns {
            servers: [server1.into(), server2.into()],
            name: name.into(),
        }
    }

    /// Create a TCP port check request.
    pub fn port(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self::Port {
            host: host.into(),
            port: port.into(),
        }
    }

    /// The screen this request belongs to.
    #[must_use]
    pub fn kind(&self) -> ProbeKind {
        match self {
            Self::Dns { .. } => ProbeKind::Dns,
            Self::Port { .. } => ProbeKind::Port,
        }
    }
}

/// Answer from a single DNS server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsServerResult {
    /// Resolver that was queried
    pub server: String,
    /// Resolved addresses (empty on failure)
    pub addresses: Vec<String>,
    /// Canonical name when the query was redirected
    pub alias: Option<String>,
    /// Error message if the lookup failed
    pub error: Option<String>,
}

impl DnsServerResult {
    /// Create a successful answer.
    pub fn success(
        server: impl Into<String>,
        addresses: Vec<String>,
        alias: Option<String>,
    ) -> Self {
        Self {
            server: server.into(),
            addresses,
            alias,
            error: None,
        }
    }

    /// Create a failed answer with an empty payload.
    pub fn failure(server: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            addresses: Vec::new(),
            alias: None,
            error: Some(error.into()),
        }
    }

    /// Check if the server answered.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Combined answer of a dual-server DNS lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsLookupResult {
    /// Queried hostname
    pub name: String,
    /// One answer per server, in server slot order
    pub results: [DnsServerResult; 2],
    /// When the lookup finished
    pub completed_at: DateTime<Local>,
}

impl DnsLookupResult {
    /// Combine the two per-server answers.
    pub fn new(name: impl Into<String>, results: [DnsServerResult; 2]) -> Self {
        Self {
            name: name.into(),
            results,
            completed_at: Local::now(),
        }
    }

    /// First alias reported by any server, in slot order.
    #[must_use]
    pub fn alias(&self) -> Option<&str> {
        self.results.iter().find_map(|r| r.alias.as_deref())
    }
}

/// TCP port check result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortCheckResult {
    /// Target host
    pub host: String,
    /// Target port as requested
    pub port: String,
    /// Whether the connection was accepted
    pub open: bool,
    /// Connect round-trip time in milliseconds (only when open)
    pub rtt_ms: Option<f64>,
    /// Error message if the connection failed
    pub error: Option<String>,
    /// When the check finished
    pub completed_at: DateTime<Local>,
}

impl PortCheckResult {
    /// Create an open-port result.
    pub fn open(host: impl Into<String>, port: impl Into<String>, rtt_ms: f64) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            open: true,
            rtt_ms: Some(rtt_ms),
            error: None,
            completed_at: Local::now(),
        }
    }

    /// Create a closed or filtered result.
    pub fn closed(
        host: impl Into<String>,
        port: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
            open: false,
            rtt_ms: None,
            error: Some(error.into()),
            completed_at: Local::now(),
        }
    }
}

/// Final outcome of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// Combined dual-server lookup
    Dns(DnsLookupResult),
    /// Port check
    Port(PortCheckResult),
}

impl ProbeOutcome {
    /// The screen this outcome belongs to.
    #[must_use]
    pub fn kind(&self) -> ProbeKind {
        match self {
            Self::Dns(_) => ProbeKind::Dns,
            Self::Port(_) => ProbeKind::Port,
        }
    }
}

/// The single message a launched request delivers back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeCompletion {
    /// Request this completion answers
    pub id: RequestId,
    /// What the probe found
    pub outcome: ProbeOutcome,
}
