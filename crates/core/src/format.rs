use crate::metrics::{CpuInfo, DiskInfo, MemoryInfo};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Format a byte count as gigabytes with two decimals (e.g. `"7.32"`).
///
/// Missing or non-finite input renders as `"0.00"`.
pub fn bytes_to_gb(bytes: Option<f64>) -> String {
    match bytes {
        Some(b) if b.is_finite() => format!("{:.2}", b / GIB),
        _ => "0.00".to_string(),
    }
}

/// `"NN.NN%"`
pub fn percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// `"used GB / total GB"`, e.g. `"0.50GB / 1.00GB"`.
pub fn used_of_total(used: f64, total: f64) -> String {
    format!("{}GB / {}GB", bytes_to_gb(Some(used)), bytes_to_gb(Some(total)))
}

/// Headline and optional detail line shown on a metric card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardText {
    pub headline: String,
    pub detail:   Option<String>,
}

pub trait Summary {
    fn summary(&self) -> CardText;
}

impl Summary for CpuInfo {
    fn summary(&self) -> CardText {
        CardText { headline: percent(self.usage), detail: None }
    }
}

impl Summary for MemoryInfo {
    fn summary(&self) -> CardText {
        CardText {
            headline: percent(self.used_percent),
            detail:   Some(used_of_total(self.used, self.total)),
        }
    }
}

impl Summary for DiskInfo {
    fn summary(&self) -> CardText {
        CardText {
            headline: percent(self.used_percent),
            detail:   Some(format!("{} on {}", used_of_total(self.used, self.total), self.path)),
        }
    }
}

/// Colour bucket for a usage percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageLevel {
    Normal,
    Warning,
    Critical,
}

impl UsageLevel {
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 80.0 {
            Self::Critical
        } else if percent >= 60.0 {
            Self::Warning
        } else {
            Self::Normal
        }
    }
}
