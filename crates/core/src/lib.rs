pub mod cluster;
pub mod error;
pub mod event;
pub mod format;
pub mod metrics;
pub mod state;

pub use error::{ClustoryError, FetchError, Result};
pub use event::{Message, PollCycle, Section};
pub use metrics::{ClusterInfo, CpuInfo, DiskInfo, MemoryInfo, MetricKind, PodInfo};
pub use state::DashboardState;
