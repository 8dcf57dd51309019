pub mod colors;
pub mod style;

pub use colors::Color;

use clustory_config::ThemeConfig;
use clustory_core::format::UsageLevel;

/// Compiled theme derived from [`ThemeConfig`].
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Calling [`Theme::from_config`] is infallible: invalid color strings fall
/// back to safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent:     Color,
    pub normal:     Color,
    pub warning:    Color,
    pub critical:   Color,
    pub font_size:  f32,
    pub padding:    u16,
    pub gap:        u16,
}

impl Theme {
    /// Build a [`Theme`] from the config file's `[theme]` section.
    pub fn from_config(cfg: &ThemeConfig) -> Self {
        Self {
            background: Color::from_hex(&cfg.background).unwrap_or(Color::BASE),
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::TEXT),
            accent:     Color::from_hex(&cfg.accent).unwrap_or(Color::BLUE),
            normal:     Color::from_hex(&cfg.normal).unwrap_or(Color::GREEN),
            warning:    Color::from_hex(&cfg.warning).unwrap_or(Color::YELLOW),
            critical:   Color::from_hex(&cfg.critical).unwrap_or(Color::RED),
            font_size:  cfg.font_size,
            padding:    cfg.padding,
            gap:        cfg.gap,
        }
    }

    /// Color for a usage percentage (≥80 critical, ≥60 warning).
    pub fn usage_color(&self, percent: f64) -> Color {
        match UsageLevel::from_percent(percent) {
            UsageLevel::Normal   => self.normal,
            UsageLevel::Warning  => self.warning,
            UsageLevel::Critical => self.critical,
        }
    }

    /// Text color for inline error messages.
    pub fn error(&self) -> Color {
        self.critical
    }

    /// Text color for secondary lines.
    pub fn muted(&self) -> Color {
        self.foreground.with_alpha(0.6)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}
