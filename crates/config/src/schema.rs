use clustory_history::RangeSelection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure parsed from `clustory.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClustoryConfig {
    /// Where the metrics API lives.
    pub api: ApiConfig,
    /// Poll schedule and history sizing.
    pub polling: PollingConfig,
    /// CSV export settings.
    pub export: ExportConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
    /// Initial window geometry.
    pub window: WindowConfig,
}

/// Metrics API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address, e.g. `"http://localhost:8080"`.
    pub base_url: String,
    /// Per-request timeout. Unset = transport default.
    pub timeout_ms: Option<u64>,
    /// Also poll the node/pod listing at `/api/k8sinfo`.
    pub cluster: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url:   "http://localhost:8080".to_string(),
            timeout_ms: None,
            cluster:    true,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Poll period in milliseconds.
    pub interval_ms: u64,
    /// Maximum samples kept per metric.
    pub history_capacity: usize,
    /// Range selected when the dashboard opens.
    pub default_range: RangeSelection,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_ms:      5_000,
            history_capacity: clustory_history::DEFAULT_CAPACITY,
            default_range:    RangeSelection::LastFiveMinutes,
        }
    }
}

impl PollingConfig {
    /// Poll period, never shorter than 1 ms.
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(1))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory CSV files are written into.
    pub directory: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from(".") }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#1e1e2e"`).
    pub background: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Accent / highlight color (headings, chart bars).
    pub accent: String,
    /// Usage below 60%.
    pub normal: String,
    /// Usage from 60% up to 80%.
    pub warning: String,
    /// Usage at or above 80%, and error text.
    pub critical: String,
    /// Base font size in points.
    pub font_size: f32,
    /// Inner padding for each card (pixels).
    pub padding: u16,
    /// Gap between cards (pixels).
    pub gap: u16,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background: "#1e1e2e".to_string(), // Catppuccin Mocha base
            foreground: "#cdd6f4".to_string(), // Catppuccin Mocha text
            accent:     "#89b4fa".to_string(), // Catppuccin Mocha blue
            normal:     "#a6e3a1".to_string(), // Catppuccin Mocha green
            warning:    "#f9e2af".to_string(), // Catppuccin Mocha yellow
            critical:   "#f38ba8".to_string(), // Catppuccin Mocha red
            font_size:  14.0,
            padding:    16,
            gap:        12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width:  f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 1100.0, height: 760.0 }
    }
}
