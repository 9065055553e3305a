//! ddtail
//!
//! Tail Datadog logs in real time from the command line.
//!
//! Architecture:
//! - Configuration: credentials and tailing parameters, validated up front
//! - Client: HTTP communication with the Logs Search API (ddtail-client)
//! - Output: one-line rendering of log entries sized to the terminal
//! - Tailing: the fetch/print/wait loop with cursor-based incremental fetch
//!
//! Rendered log lines go to stdout; all diagnostics go to stderr, so the
//! log stream stays pipeable.

mod config;
mod output;
mod signals;
mod tailing;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::output::LogFormatter;
use crate::tailing::Tailer;
use ddtail_client::DatadogLogsClient;

/// Deadline for the pre-flight authentication probe
const AUTH_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "ddtail", version)]
#[command(about = "Tail Datadog logs in real time", long_about = None)]
struct Cli {
    /// Search query (e.g. "service:my-app")
    query: Option<String>,

    /// Datadog API key
    #[arg(long, env = "DD_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Datadog application key
    #[arg(long, env = "DD_APPLICATION_KEY", hide_env_values = true)]
    app_key: String,

    /// Datadog site
    #[arg(long, env = "DD_SITE", default_value = config::DEFAULT_SITE)]
    site: String,

    /// Seconds between polls
    #[arg(long, default_value_t = 5)]
    interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ddtail_cli=info,ddtail_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(
        &cli.api_key,
        &cli.app_key,
        &cli.site,
        cli.query,
        Duration::from_secs(cli.interval),
    );
    config.validate().context("invalid configuration")?;

    let client = DatadogLogsClient::new(&config.site, &config.api_key, &config.app_key);

    info!("testing authentication against {}", client.base_url());
    tokio::time::timeout(AUTH_PROBE_TIMEOUT, client.fetch_logs("*", None))
        .await
        .context("authentication probe timed out")?
        .context("authentication failed")?;
    info!("authentication successful");

    let query = config.query().to_string();
    println!("Tailing logs with query: {query}");
    println!("Press Ctrl+C to stop...");
    println!();

    let shutdown = signals::shutdown_signal();
    let tailer = Tailer::new(client, LogFormatter::new(), config.poll_interval);
    tailer.run(&query, shutdown).await.context("tailing failed")?;

    info!("log tailing stopped");
    Ok(())
}
