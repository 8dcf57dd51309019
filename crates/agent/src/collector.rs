use clustory_core::{CpuInfo, DiskInfo, MemoryInfo};
use std::path::{Path, PathBuf};
use std::time::Duration;
use sysinfo::{Disks, System};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// Latest host reading served by the API.
#[derive(Debug, Clone, PartialEq)]
pub struct HostSnapshot {
    pub cpu:    CpuInfo,
    pub memory: MemoryInfo,
    /// `Err` carries the message returned to clients when the watched mount
    /// point is missing.
    pub disk:   Result<DiskInfo, String>,
}

/// Spawn a background Tokio task that samples the host every `interval` and
/// publishes the newest [`HostSnapshot`] through the returned channel.
///
/// The task stops automatically when every receiver is dropped.
pub fn spawn_collector(interval: Duration, disk_path: PathBuf) -> watch::Receiver<HostSnapshot> {
    let mut sys   = System::new_all();
    let mut disks = Disks::new_with_refreshed_list();
    let (tx, rx)  = watch::channel(take_snapshot(&sys, &disks, &disk_path));

    tokio::spawn(async move {
        let mut ticker = time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            sys.refresh_cpu_usage();
            sys.refresh_memory();
            disks.refresh(true);

            let snapshot = take_snapshot(&sys, &disks, &disk_path);
            debug!(cpu = snapshot.cpu.usage, memory = snapshot.memory.used_percent, "host sampled");

            if tx.send(snapshot).is_err() {
                break; // all receivers dropped
            }
        }
    });

    rx
}

fn take_snapshot(sys: &System, disks: &Disks, disk_path: &Path) -> HostSnapshot {
    // ── CPU ──────────────────────────────────────────────────────────────────
    let cpu = CpuInfo { usage: f64::from(sys.global_cpu_usage()) };

    // ── Memory ───────────────────────────────────────────────────────────────
    let total  = sys.total_memory() as f64;
    let used   = sys.used_memory() as f64;
    let memory = MemoryInfo {
        total,
        used,
        free: sys.free_memory() as f64,
        used_percent: used_percent(used, total),
    };

    // ── Disk ─────────────────────────────────────────────────────────────────
    let disk = disks
        .iter()
        .find(|d| d.mount_point() == disk_path)
        .map(|d| disk_usage(d.total_space(), d.available_space(), disk_path))
        .ok_or_else(|| format!("no filesystem mounted at {}", disk_path.display()));

    HostSnapshot { cpu, memory, disk }
}

/// `used / total` as a percentage; 0 for an empty total.
pub fn used_percent(used: f64, total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    used / total * 100.0
}

pub fn disk_usage(total: u64, available: u64, path: &Path) -> DiskInfo {
    let used = total.saturating_sub(available);
    DiskInfo {
        total:        total as f64,
        used:         used as f64,
        free:         available as f64,
        used_percent: used_percent(used as f64, total as f64),
        path:         path.display().to_string(),
    }
}
