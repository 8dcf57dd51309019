use crate::meter::usage_meter;
use clustory_core::cluster::{self, ClusterSummary};
use clustory_core::state::Phase;
use clustory_core::{ClusterInfo, DashboardState, Message};
use clustory_theme::{style, Theme};
use iced::{
    widget::{column, container, row, text, text_input, Column, Row, Space},
    Alignment, Element, Length,
};

const GRID_COLUMNS: usize = 3;

/// Node/pod listing from the API plus the cluster inventory grid.
#[derive(Debug, Clone)]
pub struct ClusterView {
    clusters: Vec<ClusterSummary>,
}

impl Default for ClusterView {
    fn default() -> Self {
        Self::new()
    }
}

impl ClusterView {
    pub fn new() -> Self {
        Self { clusters: cluster::inventory() }
    }

    pub fn view<'a>(
        &'a self,
        state: &'a DashboardState,
        search: &str,
        theme: &Theme,
    ) -> Element<'a, Message> {
        column![self.topology(state, theme), self.inventory(search, theme)]
            .spacing(theme.gap as f32 * 2.0)
            .into()
    }

    // ── Nodes & pods (live) ───────────────────────────────────────────────────

    fn topology<'a>(&self, state: &'a DashboardState, theme: &Theme) -> Element<'a, Message> {
        let heading = text("Nodes")
            .size(theme.font_size * 1.3)
            .color(theme.accent.to_iced());

        let body: Element<'a, Message> = match state.cluster.phase() {
            Phase::Loading => text("Loading cluster topology…")
                .color(theme.muted().to_iced())
                .into(),
            Phase::Failed { message, stale: None } => text(format!("Error: {message}"))
                .color(theme.error().to_iced())
                .into(),
            Phase::Failed { message, stale: Some(info) } => column![
                text(format!("Error: {message} (showing last listing)"))
                    .color(theme.error().to_iced()),
                node_list(info, theme),
            ]
            .spacing(8)
            .into(),
            Phase::Ready(info) => node_list(info, theme),
        };

        container(column![heading, body].spacing(10))
            .padding(theme.padding)
            .width(Length::Fill)
            .style(style::card(theme.foreground))
            .into()
    }

    // ── Cluster inventory ─────────────────────────────────────────────────────

    fn inventory<'a>(&'a self, search: &str, theme: &Theme) -> Element<'a, Message> {
        let totals = cluster::totals(&self.clusters);
        let stat = |value: String, label: &'static str| -> Element<'a, Message> {
            column![
                text(value).size(theme.font_size * 1.6).color(theme.accent.to_iced()),
                text(label).size(theme.font_size * 0.85).color(theme.muted().to_iced()),
            ]
            .align_x(Alignment::Center)
            .into()
        };

        let toolbar = row![
            text_input("Search clusters by name or region…", search)
                .on_input(Message::SearchChanged)
                .padding(8)
                .width(Length::Fixed(360.0)),
            Space::new().width(Length::Fill),
            stat(totals.running.to_string(), "Running Clusters"),
            stat(totals.nodes.to_string(), "Total Nodes"),
            stat(totals.pods.to_string(), "Total Pods"),
        ]
        .spacing(theme.gap as f32 * 2.0)
        .align_y(Alignment::Center);

        let matches = cluster::search(&self.clusters, search);
        let grid: Element<'a, Message> = if matches.is_empty() {
            column![
                text("No clusters found").size(theme.font_size * 1.2),
                text("Try adjusting your search criteria").color(theme.muted().to_iced()),
            ]
            .spacing(4)
            .align_x(Alignment::Center)
            .width(Length::Fill)
            .into()
        } else {
            Column::with_children(matches.chunks(GRID_COLUMNS).map(|chunk| {
                let mut cells: Vec<Element<'a, Message>> =
                    chunk.iter().map(|c| cluster_card(c, theme)).collect();
                // Pad the last row so cards keep the same width.
                while cells.len() < GRID_COLUMNS {
                    cells.push(Space::new().width(Length::Fill).into());
                }
                Row::with_children(cells).spacing(theme.gap as f32).into()
            }))
            .spacing(theme.gap as f32)
            .into()
        };

        column![toolbar, grid].spacing(theme.gap as f32 * 1.5).into()
    }
}

fn node_list<'a>(info: &ClusterInfo, theme: &Theme) -> Element<'a, Message> {
    if info.nodes.is_empty() {
        return text("No nodes reported").color(theme.muted().to_iced()).into();
    }

    Column::with_children(info.nodes.iter().map(|node| -> Element<'a, Message> {
        let pods = info.pods_on(node);
        let mut entry = column![row![
            text(node.clone()).size(theme.font_size * 1.1),
            Space::new().width(Length::Fill),
            text(format!("{} pods", pods.len())).color(theme.muted().to_iced()),
        ]]
        .spacing(2);

        for pod in pods {
            entry = entry.push(
                text(format!("  {pod}"))
                    .size(theme.font_size * 0.85)
                    .color(theme.muted().to_iced()),
            );
        }
        entry.into()
    }))
    .spacing(8)
    .into()
}

fn cluster_card<'a>(c: &ClusterSummary, theme: &Theme) -> Element<'a, Message> {
    let usage = |label: &'static str, percent: f64| -> Element<'a, Message> {
        let color = theme.usage_color(percent);
        column![
            row![
                text(label).size(theme.font_size * 0.9),
                Space::new().width(Length::Fill),
                text(format!("{percent:.0}%"))
                    .size(theme.font_size * 0.9)
                    .color(color.to_iced()),
            ],
            usage_meter(percent, color, theme),
        ]
        .spacing(4)
        .into()
    };

    let count = |label: &'static str, value: u32| -> Element<'a, Message> {
        column![
            text(label).size(theme.font_size * 0.8).color(theme.muted().to_iced()),
            text(value.to_string()).size(theme.font_size * 1.2),
        ]
        .align_x(Alignment::Center)
        .width(Length::Fill)
        .into()
    };

    let status_color = match c.status {
        cluster::ClusterStatus::Running => theme.normal,
        cluster::ClusterStatus::Pending => theme.warning,
        cluster::ClusterStatus::Stopped => theme.critical,
    };

    container(
        column![
            text(c.name).size(theme.font_size * 1.15),
            text(format!("{} · {}", c.region, c.version))
                .size(theme.font_size * 0.85)
                .color(theme.muted().to_iced()),
            row![
                text(c.status.label()).color(status_color.to_iced()),
                Space::new().width(Length::Fill),
                text(format!("Uptime: {}", c.uptime))
                    .size(theme.font_size * 0.8)
                    .color(theme.muted().to_iced()),
            ],
            usage("CPU Usage", c.cpu_usage),
            usage("Memory Usage", c.memory_usage),
            row![
                count("Nodes", c.nodes),
                count("Pods", c.pods),
                count("Services", c.services),
            ],
            text(format!("Last updated: {}", c.last_updated))
                .size(theme.font_size * 0.8)
                .color(theme.muted().to_iced()),
        ]
        .spacing(10),
    )
    .padding(theme.padding)
    .width(Length::Fill)
    .style(style::card(theme.foreground))
    .into()
}
