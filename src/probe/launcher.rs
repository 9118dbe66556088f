//! Background execution of probe requests.
//!
//! The launcher turns a [`ProbeRequest`] into a spawned task and guarantees
//! that the task sends exactly one [`ProbeCompletion`] into the event channel,
//! whatever happens to the sub-probes inside it. DNS requests fan out to both
//! servers concurrently and fan back in by slot, not by arrival order.

use crate::probe::dns::resolve_via_server;
use crate::probe::tcp::check_tcp_port;
use crate::probe::types::{
    DnsLookupResult, DnsServerResult, PortCheckResult, ProbeCompletion, ProbeKind, ProbeOutcome,
    ProbeRequest, RequestId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::{timeout, timeout_at, Instant};

/// Default shared deadline for both DNS sub-probes in seconds.
pub const DEFAULT_DNS_DEADLINE_SECS: u64 = 10;

/// Default deadline for a TCP port check in seconds.
pub const DEFAULT_PORT_DEADLINE_SECS: u64 = 5;

/// The network operations a request can perform.
///
/// Implementations must encode failures in the returned result. The
/// launcher enforces deadlines on top of whatever the implementation does.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Resolve `name` through `server`.
    async fn resolve(&self, server: &str, name: &str, deadline: Duration) -> DnsServerResult;

    /// Try a TCP connection to `host:port`.
    async fn check_port(&self, host: &str, port: &str, deadline: Duration) -> PortCheckResult;
}

/// Prober backed by real resolvers and sockets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkProber;

#[async_trait]
impl Prober for NetworkProber {
    async fn resolve(&self, server: &str, name: &str, deadline: Duration) -> DnsServerResult {
        resolve_via_server(server, name, deadline).await
    }

    async fn check_port(&self, host: &str, port: &str, deadline: Duration) -> PortCheckResult {
        check_tcp_port(host, port, deadline).await
    }
}

/// Stand-in for "never" when a deadline does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Per-kind probe deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadlines {
    /// Shared deadline for the two DNS sub-probes
    pub dns: Duration,
    /// Deadline for a port check
    pub port: Duration,
}

impl Default for Deadlines {
    fn default() -> Self {
        Self {
            dns: Duration::from_secs(DEFAULT_DNS_DEADLINE_SECS),
            port: Duration::from_secs(DEFAULT_PORT_DEADLINE_SECS),
        }
    }
}

/// Instant `duration` from now, clamped to [`FAR_FUTURE`] on overflow.
fn deadline_after(duration: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(duration).unwrap_or_else(|| now + FAR_FUTURE)
}

/// Run one sub-probe against the shared DNS deadline.
async fn resolve_slot(
    prober: &dyn Prober,
    server: &str,
    name: &str,
    deadline: Instant,
) -> DnsServerResult {
    let remaining = deadline.saturating_duration_since(Instant::now());
    match timeout_at(deadline, prober.resolve(server, name, remaining)).await {
        Ok(result) => result,
        Err(_) => DnsServerResult::failure(server, "timed out"),
    }
}

/// Execute a request to completion.
///
/// Never fails and never outlives its deadline: a DNS request finishes
/// within `deadlines.dns`, a port check within `deadlines.port`.
pub async fn run_request(
    prober: &dyn Prober,
    request: ProbeRequest,
    deadlines: Deadlines,
) -> ProbeOutcome {
    match request {
        ProbeRequest::Dns {
            servers: [server1, server2],
            name,
        } => {
            let deadline = deadline_after(deadlines.dns);
            let (first, second) = futures::future::join(
                resolve_slot(prober, &server1, &name, deadline),
                resolve_slot(prober, &server2, &name, deadline),
            )
            .await;
            ProbeOutcome::Dns(DnsLookupResult::new(name, [first, second]))
        }
        ProbeRequest::Port { host, port } => {
            let result =
                match timeout(deadlines.port, prober.check_port(&host, &port, deadlines.port))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => PortCheckResult::closed(host, port, "timed out"),
                };
            ProbeOutcome::Port(result)
        }
    }
}

/// Spawns requests and tracks the running task of each screen.
///
/// `E` is the event type of the loop the completions are delivered to.
pub struct ProbeLauncher<E> {
    prober: Arc<dyn Prober>,
    deadlines: Deadlines,
    events: mpsc::UnboundedSender<E>,
    running: HashMap<ProbeKind, AbortHandle>,
}

impl<E> ProbeLauncher<E>
where
    E: From<ProbeCompletion> + Send + 'static,
{
    /// Create a launcher that delivers completions into `events`.
    pub fn new(
        prober: Arc<dyn Prober>,
        deadlines: Deadlines,
        events: mpsc::UnboundedSender<E>,
    ) -> Self {
        Self {
            prober,
            deadlines,
            events,
            running: HashMap::new(),
        }
    }

    /// Start `request` in the background and return immediately.
    ///
    /// Any task still running for the same screen is aborted first.
    pub fn launch(&mut self, id: RequestId, request: ProbeRequest) {
        let kind = request.kind();
        let prober = Arc::clone(&self.prober);
        let events = self.events.clone();
        let deadlines = self.deadlines;

        tracing::info!("Launching {kind:?} request {id}");

        let handle = tokio::spawn(async move {
            let outcome = run_request(prober.as_ref(), request, deadlines).await;
            tracing::info!("Request {id} completed");
            if events.send(ProbeCompletion { id, outcome }.into()).is_err() {
                tracing::debug!("Event loop closed, dropping completion of {id}");
            }
        });

        if let Some(previous) = self.running.insert(kind, handle.abort_handle()) {
            previous.abort();
        }
    }

    /// Abort the task running for `kind`, if any.
    ///
    /// Returns `true` when there was a task to abort.
    pub fn cancel(&mut self, kind: ProbeKind) -> bool {
        match self.running.remove(&kind) {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    tracing::info!("Cancelled running {kind:?} request");
                }
                was_running
            }
            None => false,
        }
    }
}
