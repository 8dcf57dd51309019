use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The three polled host metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
}

impl MetricKind {
    pub const ALL: [Self; 3] = [Self::Cpu, Self::Memory, Self::Disk];

    /// Endpoint path relative to the API base address.
    pub fn path(self) -> &'static str {
        match self {
            Self::Cpu    => "/api/metrics/cpu",
            Self::Memory => "/api/metrics/memory",
            Self::Disk   => "/api/metrics/disk",
        }
    }

    /// Lowercase identifier, used in log fields and export filenames.
    pub fn id(self) -> &'static str {
        match self {
            Self::Cpu    => "cpu",
            Self::Memory => "memory",
            Self::Disk   => "disk",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Cpu    => "CPU Usage",
            Self::Memory => "Memory Usage",
            Self::Disk   => "Disk Usage",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Path of the combined node/pod listing.
pub const CLUSTER_PATH: &str = "/api/k8sinfo";

/// A payload that contributes one scalar sample to a history buffer.
pub trait Sampled {
    fn sample(&self) -> f64;
}

/// `GET /api/metrics/cpu`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuInfo {
    /// Percent, 0 – 100.
    pub usage: f64,
}

/// `GET /api/metrics/memory`.
///
/// Byte counts are JSON numbers and may arrive with a fractional part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryInfo {
    pub total:        f64,
    pub used:         f64,
    pub free:         f64,
    pub used_percent: f64,
}

/// `GET /api/metrics/disk` (byte counts for one mount point, as for memory).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskInfo {
    pub total:        f64,
    pub used:         f64,
    pub free:         f64,
    pub used_percent: f64,
    pub path:         String,
}

impl Sampled for CpuInfo {
    fn sample(&self) -> f64 {
        self.usage
    }
}

impl Sampled for MemoryInfo {
    fn sample(&self) -> f64 {
        self.used_percent
    }
}

impl Sampled for DiskInfo {
    fn sample(&self) -> f64 {
        self.used_percent
    }
}

/// `GET /api/k8sinfo`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    pub nodes:      Vec<String>,
    pub pods:       Vec<PodInfo>,
    /// Node name → `namespace/name` of every pod scheduled on it.
    pub nodes_pods: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PodInfo {
    /// `namespace/name`
    pub name: String,
    pub node: String,
}

impl ClusterInfo {
    /// Build the listing from `(namespace/name, node)` pairs, deriving the
    /// node → pods index.
    pub fn from_pods(nodes: Vec<String>, pods: Vec<PodInfo>) -> Self {
        let mut nodes_pods: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for pod in &pods {
            nodes_pods
                .entry(pod.node.clone())
                .or_default()
                .push(pod.name.clone());
        }
        Self { nodes, pods, nodes_pods }
    }

    /// Pods scheduled on `node`, in listing order.
    pub fn pods_on(&self, node: &str) -> &[String] {
        self.nodes_pods.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}
