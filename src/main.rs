//! netprobe - DNS lookup and port check tool
//!
//! Binary entry point for the netprobe CLI application.

#![warn(clippy::all, warnings)]
#![warn(clippy::pedantic, clippy::nursery)]

use netprobe::cli::{Cli, Commands, OutputFormat};
use netprobe::config::{ConfigLoader, Settings};
use netprobe::error::Result;
use netprobe::probe::{
    run_request, DnsLookupResult, NetworkProber, PortCheckResult, ProbeOutcome, ProbeRequest,
};
use netprobe::tui::{App, Theme};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go.
enum LogTarget {
    /// Append to a file (interactive mode owns the terminal)
    File(File),
    Stderr,
    /// The log file could not be opened
    Discard,
}

/// Open the log file for the interactive mode.
///
/// Defaults to `$CACHE_DIR/netprobe/netprobe.log`.
fn interactive_log_target(log_file: Option<&Path>) -> LogTarget {
    let path = log_file.map_or_else(
        || {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("netprobe")
                .join("netprobe.log")
        },
        Path::to_path_buf,
    );

    if let Some(dir) = path.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return LogTarget::Discard;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_or(LogTarget::Discard, LogTarget::File)
}

/// Set up logging based on verbosity level.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `quiet` - Enable error-level only logging
/// * `target` - Destination of the log lines
fn setup_logging(verbose: bool, quiet: bool, target: LogTarget) {
    let filter = if quiet {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    match target {
        LogTarget::File(file) => registry
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .init(),
        LogTarget::Stderr => registry
            .with(fmt::layer().without_time().with_writer(std::io::stderr))
            .init(),
        LogTarget::Discard => registry
            .with(fmt::layer().with_writer(std::io::sink))
            .init(),
    }
}

/// Print a DNS lookup result.
fn print_dns_result(result: &DnsLookupResult, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("Query: {}", result.name);
    if let Some(alias) = result.alias() {
        println!("CNAME: {alias}");
    }
    println!();
    println!("{:<4} {:<24} {:<40}", "#", "Server", "Answer");
    println!("{}", "-".repeat(70));
    for (idx, r) in result.results.iter().enumerate() {
        let answer = match &r.error {
            Some(e) => format!("NO RESPONSE ({e})"),
            None => r.addresses.join(", "),
        };
        println!("{:<4} {:<24} {:<40}", idx + 1, r.server, answer);
    }
    Ok(())
}

/// Print a port check result.
fn print_port_result(result: &PortCheckResult, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    let verdict = if result.open {
        format!("OPEN ({:.1} ms)", result.rtt_ms.unwrap_or_default())
    } else {
        format!(
            "CLOSED / FILTERED ({})",
            result.error.as_deref().unwrap_or("unknown")
        )
    };
    println!("{}:{}  {}", result.host, result.port, verdict);
    Ok(())
}

/// Run one probe request and print its outcome.
async fn run_once(settings: &Settings, request: ProbeRequest, format: OutputFormat) -> Result<()> {
    tracing::debug!("Running {request:?}");
    match run_request(&NetworkProber, request, settings.deadlines()).await {
        ProbeOutcome::Dns(result) => print_dns_result(&result, format),
        ProbeOutcome::Port(result) => print_port_result(&result, format),
    }
}

/// Run interactive TUI mode.
async fn run_interactive(settings: Settings) -> Result<()> {
    let theme = Theme::default();
    let mut app = App::new(settings);
    app.run(&theme).await
}

/// Main entry point for the netprobe CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let Cli {
        verbose,
        quiet,
        format,
        config,
        log_file,
        command,
    } = netprobe::cli::parse();

    let interactive = matches!(command, None | Some(Commands::Interactive));
    let target = if interactive {
        interactive_log_target(log_file.as_deref())
    } else {
        LogTarget::Stderr
    };
    setup_logging(verbose, quiet, target);

    tracing::info!("netprobe starting...");

    let settings = ConfigLoader::load(config.as_deref())?;

    match command {
        Some(Commands::Dns { name, servers }) => {
            let settings = ConfigLoader::with_servers(settings, &servers)?;
            let [server1, server2] = settings.dns_servers.clone();
            run_once(&settings, ProbeRequest::dns(server1, server2, name), format).await?;
        }

        Some(Commands::Port { host, port }) => {
            run_once(&settings, ProbeRequest::port(host, port), format).await?;
        }

        Some(Commands::Interactive) | None => {
            run_interactive(settings).await?;
        }
    }

    Ok(())
}
