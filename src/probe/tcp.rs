//! TCP reachability check.
//!
//! A port is reported open when a connection is accepted before the
//! deadline. Refused connections and timeouts are both reported as closed;
//! the distinction is kept only in the error message.

use crate::probe::types::PortCheckResult;
use std::time::{Duration, Instant};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Default connect deadline in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Check whether `host:port` accepts TCP connections.
///
/// The connection is closed as soon as it is established. The round-trip
/// time covers name resolution and the TCP handshake.
pub async fn check_tcp_port(host: &str, port: &str, deadline: Duration) -> PortCheckResult {
    let Ok(port_num) = port.trim().parse::<u16>() else {
        return PortCheckResult::closed(host, port, format!("invalid port: {port}"));
    };

    tracing::debug!("Connecting to {host}:{port_num}");

    let start = Instant::now();
    match timeout(deadline, TcpStream::connect((host, port_num))).await {
        Ok(Ok(stream)) => {
            let rtt_ms = start.elapsed().as_secs_f64() * 1000.0;
            drop(stream);
            PortCheckResult::open(host, port, rtt_ms)
        }
        Ok(Err(e)) => {
            tracing::debug!("Connect to {host}:{port_num} failed: {e}");
            PortCheckResult::closed(host, port, e.to_string())
        }
        Err(_) => PortCheckResult::closed(host, port, "timed out"),
    }
}
