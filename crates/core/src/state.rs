use crate::error::FetchError;
use crate::event::PollCycle;
use crate::metrics::{ClusterInfo, CpuInfo, DiskInfo, MemoryInfo, MetricKind, Sampled};
use chrono::{DateTime, Local};
use clustory_history::HistoryBuffer;

/// What a section of the dashboard should render right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase<'a, T> {
    /// Nothing has settled yet.
    Loading,
    /// The latest request failed. Carries the last good value, if any.
    Failed { message: &'a str, stale: Option<&'a T> },
    Ready(&'a T),
}

/// Latest value / error / loading flags for one polled resource.
#[derive(Debug, Clone)]
pub struct ResourceStatus<T> {
    current: Option<T>,
    error:   Option<String>,
    loading: bool,
}

impl<T> Default for ResourceStatus<T> {
    fn default() -> Self {
        Self { current: None, error: None, loading: true }
    }
}

impl<T> ResourceStatus<T> {
    /// Record the outcome of one request. Returns the new value on success.
    ///
    /// A failure keeps the last good value and only replaces the error.
    pub fn settle(&mut self, outcome: Result<T, FetchError>) -> Option<&T> {
        self.loading = false;
        match outcome {
            Ok(value) => {
                self.error = None;
                self.current = Some(value);
                self.current.as_ref()
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn phase(&self) -> Phase<'_, T> {
        match (&self.error, &self.current) {
            (Some(message), stale) => Phase::Failed { message: message.as_str(), stale: stale.as_ref() },
            (None, Some(value))    => Phase::Ready(value),
            (None, None)           => Phase::Loading,
        }
    }
}

/// A polled metric: its status plus the history of successful samples.
#[derive(Debug, Clone)]
pub struct MetricStatus<T> {
    status:  ResourceStatus<T>,
    history: HistoryBuffer,
}

impl<T: Sampled> MetricStatus<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            status:  ResourceStatus::default(),
            history: HistoryBuffer::new(capacity),
        }
    }

    /// Settle the status and append the sample on success.
    pub fn settle(&mut self, outcome: Result<T, FetchError>) {
        if let Some(value) = self.status.settle(outcome) {
            let sample = value.sample();
            self.history.append(sample);
        }
    }

    pub fn status(&self) -> &ResourceStatus<T> {
        &self.status
    }

    pub fn history(&self) -> &HistoryBuffer {
        &self.history
    }
}

/// Everything the dashboard renders, updated once per poll cycle.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub cpu:     MetricStatus<CpuInfo>,
    pub memory:  MetricStatus<MemoryInfo>,
    pub disk:    MetricStatus<DiskInfo>,
    pub cluster: ResourceStatus<ClusterInfo>,
    /// Number of poll cycles applied so far.
    pub cycles:  u64,
    /// Local time the last cycle was applied.
    pub last_updated: Option<DateTime<Local>>,
}

impl DashboardState {
    pub fn new(history_capacity: usize) -> Self {
        Self {
            cpu:          MetricStatus::new(history_capacity),
            memory:       MetricStatus::new(history_capacity),
            disk:         MetricStatus::new(history_capacity),
            cluster:      ResourceStatus::default(),
            cycles:       0,
            last_updated: None,
        }
    }

    /// Apply one completed poll cycle.
    ///
    /// Each resource settles independently; a failed request never touches
    /// another resource's value or history.
    pub fn apply(&mut self, cycle: PollCycle) {
        self.cpu.settle(cycle.cpu);
        self.memory.settle(cycle.memory);
        self.disk.settle(cycle.disk);
        if let Some(cluster) = cycle.cluster {
            self.cluster.settle(cluster);
        }
        self.cycles += 1;
        self.last_updated = Some(Local::now());
        tracing::trace!(seq = cycle.seq, cycles = self.cycles, "poll cycle applied");
    }

    pub fn history(&self, kind: MetricKind) -> &HistoryBuffer {
        match kind {
            MetricKind::Cpu    => self.cpu.history(),
            MetricKind::Memory => self.memory.history(),
            MetricKind::Disk   => self.disk.history(),
        }
    }

    pub fn error(&self, kind: MetricKind) -> Option<&str> {
        match kind {
            MetricKind::Cpu    => self.cpu.status().error(),
            MetricKind::Memory => self.memory.status().error(),
            MetricKind::Disk   => self.disk.status().error(),
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(clustory_history::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory(percent: f64) -> MemoryInfo {
        MemoryInfo { total: 100.0, used: percent, free: 100.0 - percent, used_percent: percent }
    }

    fn disk() -> DiskInfo {
        DiskInfo { total: 10.0, used: 5.0, free: 5.0, used_percent: 50.0, path: "/".into() }
    }

    fn cycle(seq: u64, cpu: Result<CpuInfo, FetchError>) -> PollCycle {
        PollCycle { seq, cpu, memory: Ok(memory(40.0)), disk: Ok(disk()), cluster: None }
    }

    fn status_500() -> FetchError {
        FetchError::Status { code: 500, reason: "Internal Server Error".into() }
    }

    #[test]
    fn starts_loading() {
        let state = DashboardState::default();
        assert!(state.cpu.status().is_loading());
        assert_eq!(state.cpu.status().phase(), Phase::Loading);
        assert!(state.cluster.is_loading());
    }

    #[test]
    fn success_appends_and_clears_error() {
        let mut state = DashboardState::default();
        state.apply(cycle(1, Err(status_500())));
        assert!(state.error(MetricKind::Cpu).is_some());

        state.apply(cycle(2, Ok(CpuInfo { usage: 12.5 })));
        assert_eq!(state.error(MetricKind::Cpu), None);
        assert_eq!(state.history(MetricKind::Cpu).latest(), Some(12.5));
        assert_eq!(state.cycles, 2);
    }

    #[test]
    fn failure_keeps_last_value_and_skips_append() {
        let mut state = DashboardState::default();
        state.apply(cycle(1, Ok(CpuInfo { usage: 30.0 })));
        state.apply(cycle(2, Err(status_500())));

        let cpu = state.cpu.status();
        assert_eq!(cpu.current(), Some(&CpuInfo { usage: 30.0 }));
        assert_eq!(state.history(MetricKind::Cpu).len(), 1);
        match cpu.phase() {
            Phase::Failed { message, stale } => {
                assert!(message.contains("500"));
                assert_eq!(stale, Some(&CpuInfo { usage: 30.0 }));
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[test]
    fn cpu_failure_leaves_other_metrics_ready() {
        let mut state = DashboardState::default();
        state.apply(cycle(1, Err(status_500())));
        assert!(matches!(state.memory.status().phase(), Phase::Ready(_)));
        assert!(matches!(state.disk.status().phase(), Phase::Ready(_)));
        assert_eq!(state.history(MetricKind::Memory).latest(), Some(40.0));
        assert!(state.history(MetricKind::Cpu).is_empty());
    }

    #[test]
    fn cluster_untouched_when_not_polled() {
        let mut state = DashboardState::default();
        state.apply(cycle(1, Ok(CpuInfo { usage: 1.0 })));
        assert!(state.cluster.is_loading());
    }
}
