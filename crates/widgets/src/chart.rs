use clustory_core::{DashboardState, Message, MetricKind};
use clustory_history::{format_series, ChartPoint, RangeSelection};
use clustory_theme::{style, Theme};
use iced::{
    widget::{button, column, container, row, text, Row, Space},
    Alignment, Element, Length,
};
use std::time::Duration;

/// Most bars drawn per chart; longer series are averaged into buckets.
pub const MAX_BARS: usize = 120;

const CHART_HEIGHT: f32 = 120.0;

/// Bar chart of one metric's history over the selected range, with an export
/// button.
#[derive(Debug, Clone, Copy)]
pub struct HistoryChart {
    kind: MetricKind,
}

impl HistoryChart {
    pub fn new(kind: MetricKind) -> Self {
        Self { kind }
    }

    pub fn view<'a>(
        &self,
        state: &'a DashboardState,
        range: RangeSelection,
        period: Duration,
        theme: &Theme,
    ) -> Element<'a, Message> {
        let samples = state.history(self.kind).filter(range, period);
        let points  = format_series(&samples);

        let header = row![
            text(self.kind.title())
                .size(theme.font_size * 1.2)
                .color(theme.accent.to_iced()),
            Space::new().width(Length::Fill),
            button(text("Export CSV")).on_press(Message::ExportRequested(self.kind)),
        ]
        .align_y(Alignment::Center);

        let heights = downsample(&points, MAX_BARS);
        let bars: Row<'a, Message> =
            Row::with_children(heights.into_iter().map(|value| -> Element<'a, Message> {
                let height = (value.clamp(0.0, 100.0) / 100.0) as f32 * CHART_HEIGHT;
                container(text(""))
                    .width(Length::Fill)
                    .height(Length::Fixed(height.max(1.0)))
                    .style(style::filled(theme.usage_color(value)))
                    .into()
            }))
            .spacing(1)
            .height(Length::Fixed(CHART_HEIGHT))
            .width(Length::Fill)
            .align_y(Alignment::End);

        container(
            column![
                header,
                bars,
                text(caption(&points, range))
                    .size(theme.font_size * 0.85)
                    .color(theme.muted().to_iced()),
            ]
            .spacing(8),
        )
        .padding(theme.padding)
        .width(Length::Fill)
        .style(style::card(theme.foreground))
        .into()
    }
}

fn caption(points: &[ChartPoint], range: RangeSelection) -> String {
    match points.last() {
        None => format!("{}: no samples yet", range.label()),
        Some(last) => {
            let avg = points.iter().map(|p| p.value).sum::<f64>() / points.len() as f64;
            format!(
                "{}: {} points · latest {:.2}% · avg {avg:.2}%",
                range.label(),
                points.len(),
                last.value
            )
        }
    }
}

/// Reduce `points` to at most `max` values by averaging consecutive buckets.
pub fn downsample(points: &[ChartPoint], max: usize) -> Vec<f64> {
    let max = max.max(1);
    if points.len() <= max {
        return points.iter().map(|p| p.value).collect();
    }

    let bucket = points.len().div_ceil(max);
    points
        .chunks(bucket)
        .map(|chunk| chunk.iter().map(|p| p.value).sum::<f64>() / chunk.len() as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_passes_through() {
        let points = format_series(&[1.0, 2.0, 3.0]);
        assert_eq!(downsample(&points, 10), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn long_series_is_bucketed() {
        let samples: Vec<f64> = (0..720).map(|i| (i % 2) as f64 * 10.0).collect();
        let bars = downsample(&format_series(&samples), MAX_BARS);
        assert_eq!(bars.len(), MAX_BARS);
        assert!(bars.iter().all(|&v| (v - 5.0).abs() < 1e-9));
    }

    #[test]
    fn caption_reports_empty_range() {
        assert_eq!(caption(&[], RangeSelection::LastHour), "Last hour: no samples yet");
        let points = format_series(&[10.0, 20.0]);
        assert_eq!(
            caption(&points, RangeSelection::All),
            "All time: 2 points · latest 20.00% · avg 15.00%"
        );
    }
}
