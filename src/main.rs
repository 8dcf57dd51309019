//! clustory: desktop dashboard for host and cluster metrics.
//!
//! Run with:  `RUST_LOG=info clustory --api-url http://localhost:8080`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clustory_app::WatchOptions;
use clustory_config::ClustoryConfig;
use clustory_history::RangeSelection;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "clustory", version, about = "Live CPU, memory, disk and cluster dashboard")]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/clustory/clustory.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Metrics API base address, overriding `api.base_url`.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Poll interval in milliseconds, overriding `polling.interval_ms`.
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the dashboard window (default).
    Dashboard,

    /// Poll without a window, printing one line per metric per cycle.
    Watch {
        /// Stop after this many poll cycles (default: until Ctrl-C).
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        cycles: Option<u64>,

        /// History range used for exports: 5m, 1h or all.
        #[arg(long)]
        range: Option<RangeSelection>,

        /// Export each metric's history as CSV into this directory on exit.
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Structured logging. RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("clustory v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => clustory_app::run(config).map_err(Into::into),
        Command::Watch { cycles, range, export } => {
            let options = WatchOptions {
                cycles,
                range: range.unwrap_or(config.polling.default_range),
                export,
            };

            let runtime = tokio::runtime::Runtime::new().context("cannot start async runtime")?;
            let report = runtime.block_on(async {
                let mut stdout = std::io::stdout();
                clustory_app::watch(&config, options, &mut stdout).await
            })?;

            tracing::info!(
                "Watched {} cycles, exported {} files",
                report.cycles,
                report.exported.len()
            );
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<ClustoryConfig> {
    let path = cli.config.clone().unwrap_or_else(clustory_config::default_path);
    let mut config = clustory_config::load(&path)?;

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(ms) = cli.interval_ms {
        config.polling.interval_ms = ms;
    }
    Ok(config)
}
