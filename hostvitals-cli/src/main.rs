mod client;
mod ops;

use clap::{Parser, Subcommand};
use ops::{list_facets, local_report, show_facet, show_report, OutputFormat};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI wrapper around the hostvitals HTTP API.
#[derive(Parser)]
#[command(
    name = "hostvitals-cli",
    author,
    version,
    about = "Hardware and OS telemetry from a hostvitals server or the local machine"
)]
struct Cli {
    /// API base url
    #[arg(long, env = "HV_API_BASE", default_value = "http://127.0.0.1:3000")]
    api_base: String,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    request_timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the full report
    Report,
    /// Fetch a single facet, e.g. "CPU" or "Operating System"
    Facet { name: String },
    /// List registered facets and their timeouts
    Facets,
    /// Collect a report on this machine without a server
    Local {
        /// Per-facet timeout
        #[arg(long, default_value_t = 2000)]
        timeout_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();
    let cli = Cli::parse();
    let base = cli.api_base.trim_end_matches('/');

    let client = client::build_client(Duration::from_secs(cli.request_timeout))?;

    match cli.command {
        Commands::Report => show_report(&client, base, cli.output).await?,
        Commands::Facet { name } => show_facet(&client, base, &name, cli.output).await?,
        Commands::Facets => list_facets(&client, base, cli.output).await?,
        Commands::Local { timeout_ms } => local_report(timeout_ms, cli.output).await?,
    }

    Ok(())
}

fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
