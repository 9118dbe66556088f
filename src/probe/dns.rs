//! DNS resolution against a specific server.
//!
//! Every lookup builds its own resolver that talks only to the requested
//! server, so the system resolver configuration (and its hosts file) never
//! takes part in the answer.

#![allow(clippy::missing_errors_doc)]

use crate::probe::types::DnsServerResult;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::time::timeout;
use trust_dns_resolver::config::{NameServerConfigGroup, ResolverConfig, ResolverOpts};
use trust_dns_resolver::proto::rr::RecordType;
use trust_dns_resolver::TokioAsyncResolver;

/// Standard DNS port, used when the server is given without one.
pub const DNS_PORT: u16 = 53;

/// Parse a server field into a socket address.
///
/// Accepts a bare IP address (port 53 implied) or an `ip:port` pair.
#[must_use]
pub fn parse_server(server: &str) -> Option<SocketAddr> {
    let server = server.trim();
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Some(addr);
    }
    server
        .parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}

/// Normalize the canonical name reported for `queried`.
///
/// Returns `None` when there was no redirect, i.e. the canonical name equals
/// the queried name ignoring ASCII case and a trailing dot.
#[must_use]
pub fn normalize_alias(canonical: &str, queried: &str) -> Option<String> {
    let canonical = canonical.trim_end_matches('.');
    let queried = queried.trim_end_matches('.');
    if canonical.is_empty() || canonical.eq_ignore_ascii_case(queried) {
        None
    } else {
        Some(canonical.to_string())
    }
}

/// Build a resolver that only queries `addr`.
fn build_resolver(addr: SocketAddr, timeout: Duration) -> Result<TokioAsyncResolver, String> {
    let config = ResolverConfig::from_parts(
        None,
        vec![],
        NameServerConfigGroup::from_ips_clear(&[addr.ip()], addr.port(), true),
    );

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = 1;
    opts.use_hosts_file = false;

    TokioAsyncResolver::tokio(config, opts).map_err(|e| e.to_string())
}

/// Resolve `name` using only `server`.
///
/// Performs the address lookup and derives the alias from the answer chain:
/// the owner name of the address records is the canonical name. All failures
/// (bad server address, resolver error, deadline) are reported through the
/// result's `error` field with an empty payload.
pub async fn resolve_via_server(server: &str, name: &str, deadline: Duration) -> DnsServerResult {
    let Some(addr) = parse_server(server) else {
        return DnsServerResult::failure(server, "invalid DNS server address");
    };

    let resolver = match build_resolver(addr, deadline) {
        Ok(r) => r,
        Err(e) => return DnsServerResult::failure(server, e),
    };

    // IP literals answer themselves; names are queried fully qualified so
    // no search suffix is appended
    let query = if name.ends_with('.') || name.parse::<IpAddr>().is_ok() {
        name.to_string()
    } else {
        format!("{name}.")
    };

    tracing::debug!("Resolving {query} via {addr}");

    match timeout(deadline, resolver.lookup_ip(query.as_str())).await {
        Ok(Ok(lookup)) => {
            let addresses: Vec<String> = lookup.iter().map(|ip| ip.to_string()).collect();
            let alias = lookup
                .as_lookup()
                .record_iter()
                .find(|r| matches!(r.record_type(), RecordType::A | RecordType::AAAA))
                .and_then(|r| normalize_alias(&r.name().to_string(), name));
            DnsServerResult::success(server, addresses, alias)
        }
        Ok(Err(e)) => {
            tracing::debug!("Lookup of {name} via {addr} failed: {e}");
            DnsServerResult::failure(server, e.to_string())
        }
        Err(_) => DnsServerResult::failure(server, "timed out"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_alias_no_redirect() {
        assert_eq!(normalize_alias("example.com.", "example.com"), None);
        assert_eq!(normalize_alias("example.com", "example.com"), None);
        assert_eq!(normalize_alias("", "example.com"), None);
    }

    #[test]
    fn test_normalize_alias_case_and_trailing_dot() {
        assert_eq!(normalize_alias("EXAMPLE.com.", "example.COM"), None);
        assert_eq!(normalize_alias("example.com", "Example.Com."), None);
    }

    #[test]
    fn test_normalize_alias_redirect() {
        assert_eq!(
            normalize_alias("edge.example.net.", "www.example.com"),
            Some("edge.example.net".to_string())
        );
    }

    #[test]
    fn test_parse_server() {
        assert_eq!(
            parse_server("1.1.1.1"),
            Some("1.1.1.1:53".parse().unwrap())
        );
        assert_eq!(
            parse_server(" 127.0.0.1:5353 "),
            Some("127.0.0.1:5353".parse().unwrap())
        );
        assert_eq!(
            parse_server("2606:4700:4700::1111"),
            Some("[2606:4700:4700::1111]:53".parse().unwrap())
        );
        assert!(parse_server("dns.google").is_none());
        assert!(parse_server("").is_none());
    }

    #[tokio::test]
    async fn test_invalid_server_is_failure() {
        let result = resolve_via_server("not-an-ip", "example.com", Duration::from_secs(1)).await;
        assert_eq!(result.server, "not-an-ip");
        assert!(result.error.is_some());
        assert!(result.addresses.is_empty());
    }

    #[tokio::test]
    async fn test_ip_literal_resolves_to_itself() {
        // Nothing listens on the discard port; the literal never hits the wire
        let result = resolve_via_server("127.0.0.1:9", "192.0.2.10", Duration::from_secs(2)).await;
        assert!(result.is_success(), "{:?}", result.error);
        assert_eq!(result.addresses, ["192.0.2.10"]);
        assert!(result.alias.is_none());
    }

    #[tokio::test]
    async fn test_resolve_example_com() {
        // Requires internet access
        if std::env::var("CI").is_ok() {
            return;
        }

        let result = resolve_via_server("1.1.1.1", "example.com", Duration::from_secs(10)).await;
        if result.is_success() {
            assert!(!result.addresses.is_empty());
            assert!(result.alias.is_none());
        }
    }
}
