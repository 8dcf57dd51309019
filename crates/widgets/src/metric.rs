use crate::meter::usage_meter;
use clustory_core::format::Summary;
use clustory_core::metrics::Sampled;
use clustory_core::state::{Phase, ResourceStatus};
use clustory_core::{DashboardState, Message, MetricKind};
use clustory_theme::{style, Theme};
use iced::{
    widget::{column, container, text},
    Element, Length,
};

/// Card showing the latest reading of one metric, a loading hint, or the
/// request error.
#[derive(Debug, Clone, Copy)]
pub struct MetricCard {
    kind: MetricKind,
}

impl MetricCard {
    pub fn new(kind: MetricKind) -> Self {
        Self { kind }
    }

    pub fn view<'a>(&self, state: &'a DashboardState, theme: &Theme) -> Element<'a, Message> {
        let body = match self.kind {
            MetricKind::Cpu    => body(state.cpu.status(), theme),
            MetricKind::Memory => body(state.memory.status(), theme),
            MetricKind::Disk   => body(state.disk.status(), theme),
        };

        container(
            column![
                text(self.kind.title())
                    .size(theme.font_size * 1.3)
                    .color(theme.accent.to_iced()),
                body,
            ]
            .spacing(10),
        )
        .padding(theme.padding)
        .width(Length::Fill)
        .style(style::card(theme.foreground))
        .into()
    }
}

fn body<'a, T: Summary + Sampled>(status: &ResourceStatus<T>, theme: &Theme) -> Element<'a, Message> {
    match status.phase() {
        Phase::Loading => text("Loading…")
            .size(theme.font_size)
            .color(theme.muted().to_iced())
            .into(),

        Phase::Ready(value) => reading(value, theme),

        Phase::Failed { message, stale } => {
            let mut lines = column![text(format!("Error: {message}"))
                .size(theme.font_size)
                .color(theme.error().to_iced())]
            .spacing(4);

            if let Some(last) = stale {
                lines = lines.push(
                    text(format!("Last reading: {}", last.summary().headline))
                        .size(theme.font_size * 0.85)
                        .color(theme.muted().to_iced()),
                );
            }
            lines.into()
        }
    }
}

fn reading<'a, T: Summary + Sampled>(value: &T, theme: &Theme) -> Element<'a, Message> {
    let summary = value.summary();
    let color   = theme.usage_color(value.sample());

    let mut lines = column![
        text(summary.headline)
            .size(theme.font_size * 2.2)
            .color(color.to_iced()),
        usage_meter(value.sample(), color, theme),
    ]
    .spacing(6);

    if let Some(detail) = summary.detail {
        lines = lines.push(
            text(detail)
                .size(theme.font_size * 0.85)
                .color(theme.muted().to_iced()),
        );
    }
    lines.into()
}
