//! Grafbak CLI
//!
//! Command-line interface for backing up Grafana dashboards.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grafbak")]
#[command(about = "Back up Grafana dashboards to JSON files", long_about = None)]
struct Cli {
    /// Grafana URL (e.g., https://grafana.example.com)
    #[arg(long = "url", env = "GRAFANA_URL", default_value = "")]
    grafana_url: String,

    /// API key or service account token
    #[arg(long, env = "GRAFANA_TOKEN", default_value = "", hide_env_values = true)]
    token: String,

    /// Request timeout in seconds
    #[arg(long, env = "GRAFBAK_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config {
        grafana_url: cli.grafana_url,
        token: cli.token,
        request_timeout: Duration::from_secs(cli.timeout),
    };

    handle_command(cli.command, &config).await
}

/// Initialize logging from `RUST_LOG`, falling back to info (debug with `--verbose`)
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "grafbak=debug,grafbak_backup=debug,grafbak_client=debug"
    } else {
        "grafbak=info,grafbak_backup=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
