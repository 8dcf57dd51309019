use clustory_client::MetricsClient;
use clustory_core::PollCycle;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodically polls the metrics API.
#[derive(Debug, Clone)]
pub struct Poller {
    client:  MetricsClient,
    period:  Duration,
    cluster: bool,
}

impl Poller {
    /// Poll every `period` (at least 1 ms). The node/pod listing is not
    /// requested unless enabled with [`Poller::with_cluster`].
    pub fn new(client: MetricsClient, period: Duration) -> Self {
        Self {
            client,
            period: period.max(Duration::from_millis(1)),
            cluster: false,
        }
    }

    #[must_use]
    pub fn with_cluster(mut self, enabled: bool) -> Self {
        self.cluster = enabled;
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Run one poll cycle.
    ///
    /// All requests are in flight at once; one failing never stops the others
    /// from completing.
    pub async fn poll(&self, seq: u64) -> PollCycle {
        let cluster = async {
            if self.cluster {
                Some(self.client.cluster().await)
            } else {
                None
            }
        };

        let (cpu, memory, disk, cluster) = futures::join!(
            self.client.cpu(),
            self.client.memory(),
            self.client.disk(),
            cluster,
        );

        let cycle = PollCycle { seq, cpu, memory, disk, cluster };
        log_failures(&cycle);
        cycle
    }

    /// Spawn the schedule: poll immediately, then every period, forwarding each
    /// [`PollCycle`] through the returned channel.
    ///
    /// Cycles never overlap; a slow cycle delays the next tick. The task stops
    /// when `cancel` fires (abandoning any in-flight cycle) or when the receiver
    /// is dropped.
    pub fn spawn(self, cancel: CancellationToken) -> mpsc::Receiver<PollCycle> {
        let (tx, rx) = mpsc::channel(4);

        tokio::spawn(async move {
            info!(
                base_url = self.client.base_url(),
                period_ms = self.period.as_millis() as u64,
                "poller started"
            );

            let mut ticker = time::interval(self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut seq = 0u64;

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                seq += 1;
                let cycle = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    cycle = self.poll(seq) => cycle,
                };

                if cancel.is_cancelled() {
                    debug!(seq, "discarding cycle that resolved after teardown");
                    break;
                }
                if tx.send(cycle).await.is_err() {
                    break; // receiver dropped
                }
            }

            info!(cycles = seq, "poller stopped");
        });

        rx
    }
}

fn log_failures(cycle: &PollCycle) {
    let failed = [
        ("cpu", cycle.cpu.as_ref().err()),
        ("memory", cycle.memory.as_ref().err()),
        ("disk", cycle.disk.as_ref().err()),
        ("cluster", cycle.cluster.as_ref().and_then(|c| c.as_ref().err())),
    ];
    for (resource, err) in failed {
        if let Some(err) = err {
            warn!(seq = cycle.seq, resource, "{err}");
        }
    }
    debug!(seq = cycle.seq, failures = cycle.failures(), "poll cycle complete");
}
