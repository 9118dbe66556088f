//! Runtime settings.

use crate::error::{Error, Result};
use crate::probe::dns::parse_server;
use crate::probe::launcher::{Deadlines, DEFAULT_DNS_DEADLINE_SECS, DEFAULT_PORT_DEADLINE_SECS};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cloudflare public resolver, pre-filled in the first server field.
pub const DEFAULT_DNS_SERVER_1: &str = "1.1.1.1";

/// Google public resolver, pre-filled in the second server field.
pub const DEFAULT_DNS_SERVER_2: &str = "8.8.8.8";

/// Upper bound accepted for either timeout.
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Settings read from `config.json`.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Resolvers pre-filled in the DNS lookup form, slot order
    pub dns_servers: [String; 2],
    /// Shared deadline for both DNS sub-probes
    pub dns_timeout_secs: u64,
    /// Deadline for a port check
    pub port_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dns_servers: [
                DEFAULT_DNS_SERVER_1.to_string(),
                DEFAULT_DNS_SERVER_2.to_string(),
            ],
            dns_timeout_secs: DEFAULT_DNS_DEADLINE_SECS,
            port_timeout_secs: DEFAULT_PORT_DEADLINE_SECS,
        }
    }
}

impl Settings {
    /// Probe deadlines derived from the timeouts.
    #[must_use]
    pub fn deadlines(&self) -> Deadlines {
        Deadlines {
            dns: Duration::from_secs(self.dns_timeout_secs),
            port: Duration::from_secs(self.port_timeout_secs),
        }
    }

    /// Check that server addresses parse and timeouts are in range.
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` for a bad server address and
    /// `Error::Config` for a timeout outside `1..=MAX_TIMEOUT_SECS`.
    pub fn validate(&self) -> Result<()> {
        for server in &self.dns_servers {
            if parse_server(server).is_none() {
                return Err(Error::Parse(format!("Invalid DNS server address: {server}")));
            }
        }
        for secs in [self.dns_timeout_secs, self.port_timeout_secs] {
            if !(1..=MAX_TIMEOUT_SECS).contains(&secs) {
                return Err(Error::config(format!(
                    "Timeouts must be between 1 and {MAX_TIMEOUT_SECS} seconds, got {secs}"
                )));
            }
        }
        Ok(())
    }
}
