use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How much of a history buffer is exposed to charts and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RangeSelection {
    #[default]
    #[serde(rename = "5m")]
    LastFiveMinutes,
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "all")]
    All,
}

impl RangeSelection {
    pub const ALL: [Self; 3] = [Self::LastFiveMinutes, Self::LastHour, Self::All];

    /// Window length, `None` for all-time.
    pub fn duration(self) -> Option<Duration> {
        match self {
            Self::LastFiveMinutes => Some(Duration::from_secs(5 * 60)),
            Self::LastHour        => Some(Duration::from_secs(60 * 60)),
            Self::All             => None,
        }
    }

    /// Number of whole samples covering the window at one sample per `period`.
    /// `None` means the entire buffer.
    pub fn points_for(self, period: Duration) -> Option<usize> {
        let window    = self.duration()?;
        let period_ms = period.as_millis().max(1);
        Some((window.as_millis() / period_ms) as usize)
    }

    /// Short token used in config files, CLI flags and export filenames.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LastFiveMinutes => "5m",
            Self::LastHour        => "1h",
            Self::All             => "all",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::LastFiveMinutes => "Last 5 minutes",
            Self::LastHour        => "Last hour",
            Self::All             => "All time",
        }
    }
}

impl fmt::Display for RangeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown range '{0}' (expected 5m, 1h or all)")]
pub struct ParseRangeError(String);

impl FromStr for RangeSelection {
    type Err = ParseRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "5m"  => Ok(Self::LastFiveMinutes),
            "1h"  => Ok(Self::LastHour),
            "all" => Ok(Self::All),
            other => Err(ParseRangeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_at_default_period() {
        let p = Duration::from_millis(5_000);
        assert_eq!(RangeSelection::LastFiveMinutes.points_for(p), Some(60));
        assert_eq!(RangeSelection::LastHour.points_for(p), Some(720));
        assert_eq!(RangeSelection::All.points_for(p), None);
    }

    #[test]
    fn points_round_down_to_whole_samples() {
        let p = Duration::from_millis(7_000);
        assert_eq!(RangeSelection::LastFiveMinutes.points_for(p), Some(42));
    }

    #[test]
    fn zero_period_does_not_divide_by_zero() {
        assert_eq!(
            RangeSelection::LastFiveMinutes.points_for(Duration::ZERO),
            Some(300_000)
        );
    }

    #[test]
    fn parses_tokens() {
        assert_eq!("1H".parse::<RangeSelection>(), Ok(RangeSelection::LastHour));
        assert_eq!(" all ".parse::<RangeSelection>(), Ok(RangeSelection::All));
        assert!("15m".parse::<RangeSelection>().is_err());
    }
}
