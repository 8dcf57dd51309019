pub mod chart;
pub mod cluster;
pub mod meter;
pub mod metric;

pub use chart::HistoryChart;
pub use cluster::ClusterView;
pub use meter::usage_meter;
pub use metric::MetricCard;
