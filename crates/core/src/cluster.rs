//! Static cluster inventory.
//!
//! Nothing here talks to Kubernetes: the cluster grid and the node/pod
//! topology served by the agent are fixed sample data.

use crate::metrics::{ClusterInfo, PodInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterStatus {
    Running,
    Pending,
    Stopped,
}

impl ClusterStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Pending => "pending",
            Self::Stopped => "stopped",
        }
    }
}

/// One card in the cluster grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterSummary {
    pub id:           &'static str,
    pub name:         &'static str,
    pub status:       ClusterStatus,
    pub region:       &'static str,
    pub version:      &'static str,
    pub nodes:        u32,
    /// Percent, 0 – 100.
    pub cpu_usage:    f64,
    /// Percent, 0 – 100.
    pub memory_usage: f64,
    pub pods:         u32,
    pub services:     u32,
    pub uptime:       &'static str,
    pub last_updated: &'static str,
}

/// Aggregates shown above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClusterTotals {
    pub running: usize,
    pub nodes:   u32,
    pub pods:    u32,
}

pub fn inventory() -> Vec<ClusterSummary> {
    use ClusterStatus::Running;

    vec![
        ClusterSummary {
            id: "prod-us-east-1", name: "Production US East", status: Running,
            region: "us-east-1", version: "v1.28.3", nodes: 12,
            cpu_usage: 68.0, memory_usage: 72.0, pods: 156, services: 23,
            uptime: "45 days", last_updated: "2 minutes ago",
        },
        ClusterSummary {
            id: "staging-eu-west-1", name: "Staging EU West", status: Running,
            region: "eu-west-1", version: "v1.28.1", nodes: 6,
            cpu_usage: 34.0, memory_usage: 45.0, pods: 78, services: 12,
            uptime: "12 days", last_updated: "5 minutes ago",
        },
        ClusterSummary {
            id: "dev-us-west-2", name: "Development US West", status: Running,
            region: "us-west-2", version: "v1.27.8", nodes: 3,
            cpu_usage: 23.0, memory_usage: 31.0, pods: 42, services: 8,
            uptime: "8 days", last_updated: "1 minute ago",
        },
        ClusterSummary {
            id: "test-ap-south-1", name: "Testing Asia Pacific", status: Running,
            region: "ap-south-1", version: "v1.28.3", nodes: 4,
            cpu_usage: 15.0, memory_usage: 28.0, pods: 24, services: 5,
            uptime: "3 days", last_updated: "8 minutes ago",
        },
        ClusterSummary {
            id: "backup-eu-central-1", name: "Backup EU Central", status: Running,
            region: "eu-central-1", version: "v1.28.2", nodes: 2,
            cpu_usage: 8.0, memory_usage: 12.0, pods: 18, services: 3,
            uptime: "21 days", last_updated: "15 minutes ago",
        },
    ]
}

/// Clusters whose name or region contains `term`, ignoring case.
/// An empty term matches everything.
pub fn search<'a>(clusters: &'a [ClusterSummary], term: &str) -> Vec<&'a ClusterSummary> {
    let term = term.trim().to_lowercase();
    clusters
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&term) || c.region.to_lowercase().contains(&term)
        })
        .collect()
}

pub fn totals(clusters: &[ClusterSummary]) -> ClusterTotals {
    ClusterTotals {
        running: clusters.iter().filter(|c| c.status == ClusterStatus::Running).count(),
        nodes:   clusters.iter().map(|c| c.nodes).sum(),
        pods:    clusters.iter().map(|c| c.pods).sum(),
    }
}

/// Node/pod listing served at `/api/k8sinfo`.
pub fn topology() -> ClusterInfo {
    let pod = |namespace: &str, name: &str, node: &str| PodInfo {
        name: format!("{namespace}/{name}"),
        node: node.to_string(),
    };

    ClusterInfo::from_pods(
        (1..=4).map(|i| format!("node-{i}")).collect(),
        vec![
            pod("default", "frontend-deployment-7d4b8c9f5-abc12", "node-2"),
            pod("default", "backend-api-6c8d9e2a1-def34", "node-3"),
            pod("database", "database-statefulset-0", "node-1"),
            pod("monitoring", "monitoring-prometheus-0", "node-4"),
            pod("ingress-nginx", "ingress-nginx-controller-xyz89", "node-2"),
        ],
    )
}
