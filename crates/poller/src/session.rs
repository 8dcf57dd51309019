use crate::poller::Poller;
use clustory_core::{DashboardState, PollCycle};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Dashboard state bound to the lifetime of one polling schedule.
///
/// The token is checked before every mutation, so a cycle that arrives after
/// [`Session::teardown`] never reaches the history buffers. Dropping the
/// session tears it down.
#[derive(Debug)]
pub struct Session {
    state:  DashboardState,
    cancel: CancellationToken,
}

impl Session {
    pub fn new(history_capacity: usize) -> Self {
        Self::with_token(history_capacity, CancellationToken::new())
    }

    /// Bind the session to an existing token, for schedules spawned
    /// elsewhere with `cancel.child_token()`.
    pub fn with_token(history_capacity: usize, cancel: CancellationToken) -> Self {
        Self {
            state: DashboardState::new(history_capacity),
            cancel,
        }
    }

    /// Create a session and spawn `poller` under its token.
    pub fn start(poller: Poller, history_capacity: usize) -> (Self, mpsc::Receiver<PollCycle>) {
        let session = Self::new(history_capacity);
        let rx = poller.spawn(session.cancel.clone());
        (session, rx)
    }

    /// Apply `cycle` unless the session was torn down. Returns whether the
    /// state changed.
    pub fn apply(&mut self, cycle: PollCycle) -> bool {
        if self.cancel.is_cancelled() {
            debug!(seq = cycle.seq, "ignoring poll cycle after teardown");
            return false;
        }
        self.state.apply(cycle);
        true
    }

    /// Cancel the schedule and freeze the state.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clustory_core::{CpuInfo, FetchError, MetricKind};

    fn cycle(seq: u64, usage: f64) -> PollCycle {
        let down = || FetchError::Transport("connection refused".into());
        PollCycle {
            seq,
            cpu:     Ok(CpuInfo { usage }),
            memory:  Err(down()),
            disk:    Err(down()),
            cluster: None,
        }
    }

    #[test]
    fn applies_while_live() {
        let mut session = Session::new(10);
        assert!(session.apply(cycle(1, 5.0)));
        assert_eq!(session.state().history(MetricKind::Cpu).latest(), Some(5.0));
    }

    #[test]
    fn late_cycle_after_teardown_is_ignored() {
        let mut session = Session::new(10);
        session.apply(cycle(1, 5.0));
        session.teardown();

        assert!(!session.apply(cycle(2, 99.0)));
        assert_eq!(session.state().history(MetricKind::Cpu).len(), 1);
        assert_eq!(session.state().cycles, 1);
    }

    #[test]
    fn drop_cancels_token() {
        let token = CancellationToken::new();
        let session = Session::with_token(10, token.clone());
        drop(session);
        assert!(token.is_cancelled());
    }

    #[test]
    fn teardown_reaches_child_schedules() {
        let root = CancellationToken::new();
        let child = root.child_token();
        let session = Session::with_token(10, root);
        session.teardown();
        assert!(child.is_cancelled());
    }
}
