//! clustory-agent: serves this host's metrics to the dashboard.
//!
//! Run with:  `RUST_LOG=info clustory-agent --port 8080`

use anyhow::{Context, Result};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "clustory-agent", version, about = "Host metrics API for the Clustory dashboard")]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Mount point reported by /api/metrics/disk.
    #[arg(long, default_value = "/")]
    disk_path: PathBuf,

    /// Host sampling interval in milliseconds.
    #[arg(long, default_value_t = 1000)]
    sample_ms: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!("clustory-agent v{} starting", env!("CARGO_PKG_VERSION"));

    let snapshot = clustory_agent::spawn_collector(Duration::from_millis(cli.sample_ms), cli.disk_path);
    let app = clustory_agent::router(snapshot, clustory_core::cluster::topology());

    let addr = SocketAddr::new(cli.bind, cli.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;

    tracing::info!("Serving metrics on http://{addr}");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
