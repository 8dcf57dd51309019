//! Headless polling loop for terminals and scripts.

use crate::export::export_metric;
use clustory_client::MetricsClient;
use clustory_config::ClustoryConfig;
use clustory_core::format::Summary;
use clustory_core::metrics::Sampled;
use clustory_core::state::{MetricStatus, Phase};
use clustory_core::{ClustoryError, DashboardState, MetricKind, Result};
use clustory_history::{ExportError, RangeSelection};
use clustory_poller::{Poller, Session};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Stop after this many cycles. `None` runs until Ctrl-C; `Some(0)` polls
    /// nothing.
    pub cycles: Option<u64>,
    pub range:  RangeSelection,
    /// Export every metric's filtered series here once polling stops.
    pub export: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WatchReport {
    pub cycles:   u64,
    pub exported: Vec<PathBuf>,
}

/// Poll the API, writing one status line per metric per cycle to `out`.
pub async fn watch<W: Write>(
    config: &ClustoryConfig,
    options: WatchOptions,
    out: &mut W,
) -> Result<WatchReport> {
    if options.cycles == Some(0) {
        info!("Cycle limit is 0; nothing to poll");
        return Ok(WatchReport::default());
    }

    let client = MetricsClient::new(&config.api.base_url, config.api.timeout())?;
    let period = config.polling.period();
    let poller = Poller::new(client, period).with_cluster(config.api.cluster);

    info!(
        "Watching {} every {}ms",
        config.api.base_url,
        period.as_millis()
    );

    let (mut session, mut rx) = Session::start(poller, config.polling.history_capacity);
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted; stopping");
                break;
            }
            cycle = rx.recv() => {
                let Some(cycle) = cycle else { break };
                let seq = cycle.seq;
                if !session.apply(cycle) {
                    break;
                }
                for line in status_lines(seq, session.state()) {
                    writeln!(out, "{line}")?;
                }
                if options.cycles.is_some_and(|limit| seq >= limit) {
                    break;
                }
            }
        }
    }
    session.teardown();

    let mut report = WatchReport { cycles: session.state().cycles, exported: Vec::new() };
    if let Some(dir) = &options.export {
        for kind in MetricKind::ALL {
            match export_metric(session.state(), kind, options.range, period, dir) {
                Ok(path) => {
                    writeln!(out, "exported {kind} to {}", path.display())?;
                    report.exported.push(path);
                }
                Err(ExportError::NoData) => {
                    writeln!(out, "no {kind} samples to export")?;
                }
                Err(e) => {
                    warn!("{kind} export failed: {e}");
                    return Err(ClustoryError::Export(e));
                }
            }
        }
    }

    Ok(report)
}

/// One line per metric describing the state after cycle `seq`.
pub fn status_lines(seq: u64, state: &DashboardState) -> Vec<String> {
    let stamp = state
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".into());

    MetricKind::ALL
        .into_iter()
        .map(|kind| {
            let status = match kind {
                MetricKind::Cpu    => describe(&state.cpu),
                MetricKind::Memory => describe(&state.memory),
                MetricKind::Disk   => describe(&state.disk),
            };
            format!("#{seq} {stamp} {:<6} {status}", kind.id())
        })
        .collect()
}

fn describe<T: Summary + Sampled>(metric: &MetricStatus<T>) -> String {
    match metric.status().phase() {
        Phase::Loading => "loading".into(),
        Phase::Failed { message, .. } => format!("error: {message}"),
        Phase::Ready(value) => {
            let text = value.summary();
            match text.detail {
                Some(detail) => format!("{} ({detail})", text.headline),
                None => text.headline,
            }
        }
    }
}
