use crate::error::FetchError;
use crate::metrics::{ClusterInfo, CpuInfo, DiskInfo, MemoryInfo, MetricKind};
use clustory_history::RangeSelection;

/// Result of one poll cycle: one outcome per resource, each independent.
#[derive(Debug, Clone)]
pub struct PollCycle {
    /// Monotonic cycle number, starting at 1.
    pub seq:     u64,
    pub cpu:     Result<CpuInfo, FetchError>,
    pub memory:  Result<MemoryInfo, FetchError>,
    pub disk:    Result<DiskInfo, FetchError>,
    /// `None` when the node/pod listing is not polled.
    pub cluster: Option<Result<ClusterInfo, FetchError>>,
}

impl PollCycle {
    /// Number of requests in this cycle that failed.
    pub fn failures(&self) -> usize {
        [self.cpu.is_err(), self.memory.is_err(), self.disk.is_err()]
            .into_iter()
            .chain(self.cluster.as_ref().map(Result::is_err))
            .filter(|failed| *failed)
            .count()
    }
}

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Overview,
    History,
    Cluster,
}

/// All messages that can flow through the dashboard.
///
/// Sources:
/// - Poller task       → `PollCompleted`
/// - Timer             → `Tick`
/// - User interaction  → everything else
#[derive(Debug, Clone)]
pub enum Message {
    // ── Poller ────────────────────────────────────────────────────────────────
    /// A poll cycle resolved.
    PollCompleted(PollCycle),

    // ── User actions ──────────────────────────────────────────────────────────
    /// Switch tab.
    SectionSelected(Section),
    /// Change the window shown by charts and exports.
    RangeSelected(RangeSelection),
    /// Write the selected range of one metric's history to CSV.
    ExportRequested(MetricKind),
    /// Cluster search box edited.
    SearchChanged(String),

    // ── Internal ──────────────────────────────────────────────────────────────
    /// One-second timer tick, refreshes the header clock.
    Tick,
    /// Dashboard is being torn down.
    Shutdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_failures_including_cluster() {
        let err = || FetchError::Transport("connection refused".into());
        let cycle = PollCycle {
            seq:     1,
            cpu:     Err(err()),
            memory:  Err(err()),
            disk:    Err(err()),
            cluster: Some(Err(err())),
        };
        assert_eq!(cycle.failures(), 4);
    }
}
