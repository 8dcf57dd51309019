//! Desktop dashboard for the metrics API.
//!
//! Owns the iced application loop and wires together its background work:
//! - Metrics poller (CPU, memory, disk, node/pod listing)
//! - 1-second timer (header clock)
//! - Window close (tears the polling session down)

pub mod export;
pub mod watch;

pub use export::{export_filename, export_metric};
pub use watch::{watch, WatchOptions, WatchReport};

use chrono::{DateTime, Local};
use clustory_client::MetricsClient;
use clustory_config::ClustoryConfig;
use clustory_core::{Message, MetricKind, Section};
use clustory_history::{ExportError, RangeSelection};
use clustory_poller::{CancellationToken, Poller, Session};
use clustory_theme::{style, Theme};
use clustory_widgets::{ClusterView, HistoryChart, MetricCard};
use futures::{channel::mpsc::Sender, SinkExt};
use iced::{
    widget::{button, column, container, row, scrollable, text, Row},
    Alignment, Element, Length, Size, Subscription, Task,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{error, info, warn};

// ── Launch settings ───────────────────────────────────────────────────────────
//
// `Subscription::run` takes a plain function pointer, so the poll stream reads
// its settings from here instead of capturing them.

struct Launch {
    config: ClustoryConfig,
    /// Parent of the poller's token; the dashboard session owns it.
    cancel: CancellationToken,
}

static LAUNCH: OnceLock<Launch> = OnceLock::new();

fn launch() -> &'static Launch {
    LAUNCH.get_or_init(|| Launch {
        config: ClustoryConfig::default(),
        cancel: CancellationToken::new(),
    })
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the dashboard window. Returns when the window is closed.
pub fn run(config: ClustoryConfig) -> iced::Result {
    let size = Size::new(config.window.width, config.window.height);
    let launch = Launch { config, cancel: CancellationToken::new() };
    if LAUNCH.set(launch).is_err() {
        warn!("Dashboard already launched in this process; keeping the first config");
    }

    iced::application(Dashboard::new, Dashboard::update, Dashboard::view)
        .title("Clustory")
        .subscription(Dashboard::subscription)
        .style(Dashboard::style)
        .window_size(size)
        .run()
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Notice {
    Saved(PathBuf),
    NoData(MetricKind),
    Failed(String),
}

struct Dashboard {
    session:    Session,
    theme:      Theme,
    base_url:   String,
    period:     Duration,
    export_dir: PathBuf,
    section:    Section,
    range:      RangeSelection,
    search:     String,
    notice:     Option<Notice>,
    now:        DateTime<Local>,
    cluster:    ClusterView,
}

impl Dashboard {
    fn new() -> (Self, Task<Message>) {
        let launch = launch();
        let config = &launch.config;

        let dashboard = Self {
            session:    Session::with_token(config.polling.history_capacity, launch.cancel.clone()),
            theme:      Theme::from_config(&config.theme),
            base_url:   config.api.base_url.clone(),
            period:     config.polling.period(),
            export_dir: config.export.directory.clone(),
            section:    Section::default(),
            range:      config.polling.default_range,
            search:     String::new(),
            notice:     None,
            now:        Local::now(),
            cluster:    ClusterView::new(),
        };

        (dashboard, Task::none())
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PollCompleted(cycle) => {
                self.session.apply(cycle);
            }
            Message::SectionSelected(section) => self.section = section,
            Message::RangeSelected(range) => {
                self.range  = range;
                self.notice = None;
            }
            Message::ExportRequested(kind) => self.notice = Some(self.export(kind)),
            Message::SearchChanged(term) => self.search = term,
            Message::Tick => self.now = Local::now(),
            Message::Shutdown => {
                info!("Dashboard closing; stopping poller");
                self.session.teardown();
            }
        }
        Task::none()
    }

    fn export(&self, kind: MetricKind) -> Notice {
        match export_metric(self.session.state(), kind, self.range, self.period, &self.export_dir) {
            Ok(path) => Notice::Saved(path),
            Err(ExportError::NoData) => Notice::NoData(kind),
            Err(e) => {
                warn!("{kind} export failed: {e}");
                Notice::Failed(e.to_string())
            }
        }
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let gap = self.theme.gap as f32;

        let body = match self.section {
            Section::Overview => self.overview(),
            Section::History  => self.history(),
            Section::Cluster  => self.cluster.view(self.session.state(), &self.search, &self.theme),
        };

        container(
            column![self.header(), self.tabs(), scrollable(body).height(Length::Fill)]
                .spacing(gap * 1.5),
        )
        .padding(self.theme.padding * 2)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
    }

    fn header(&self) -> Element<'_, Message> {
        let muted = self.theme.muted().to_iced();
        let updated = match self.session.state().last_updated {
            Some(at) => format!("Last updated {}", at.format("%H:%M:%S")),
            None     => String::from("Waiting for first poll…"),
        };

        row![
            column![
                text("Clustory")
                    .size(self.theme.font_size * 2.0)
                    .color(self.theme.accent.to_iced()),
                text(format!("API: {}", self.base_url))
                    .size(self.theme.font_size * 0.85)
                    .color(muted),
            ],
            iced::widget::Space::new().width(Length::Fill),
            column![
                text(self.now.format("%H:%M:%S").to_string()).size(self.theme.font_size * 1.2),
                text(updated).size(self.theme.font_size * 0.85).color(muted),
            ]
            .align_x(Alignment::End),
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn tabs(&self) -> Element<'_, Message> {
        let tab = |label: &'static str, section: Section| {
            let style = if self.section == section { button::primary } else { button::secondary };
            button(text(label))
                .style(style)
                .on_press(Message::SectionSelected(section))
        };

        row![
            tab("Overview", Section::Overview),
            tab("History", Section::History),
            tab("Cluster", Section::Cluster),
        ]
        .spacing(self.theme.gap as f32 / 2.0)
        .into()
    }

    fn overview(&self) -> Element<'_, Message> {
        let state = self.session.state();
        Row::with_children(
            MetricKind::ALL
                .into_iter()
                .map(|kind| MetricCard::new(kind).view(state, &self.theme)),
        )
        .spacing(self.theme.gap as f32)
        .into()
    }

    fn history(&self) -> Element<'_, Message> {
        let state = self.session.state();

        let ranges = Row::with_children(
            [RangeSelection::LastFiveMinutes, RangeSelection::LastHour, RangeSelection::All]
                .into_iter()
                .map(|range| {
                    let style = if self.range == range { button::primary } else { button::secondary };
                    Element::from(
                        button(text(range.label()))
                            .style(style)
                            .on_press(Message::RangeSelected(range)),
                    )
                }),
        )
        .spacing(self.theme.gap as f32 / 2.0);

        let mut content = column![ranges].spacing(self.theme.gap as f32);

        if let Some(notice) = &self.notice {
            let (message, color) = match notice {
                Notice::Saved(path) => (format!("Saved {}", path.display()), self.theme.normal),
                Notice::NoData(kind) => (format!("No data to export for {kind}"), self.theme.warning),
                Notice::Failed(e) => (format!("Export failed: {e}"), self.theme.error()),
            };
            content = content.push(
                container(text(message).color(color.to_iced()))
                    .padding(8)
                    .width(Length::Fill)
                    .style(style::card(self.theme.foreground)),
            );
        }

        for kind in MetricKind::ALL {
            content = content.push(HistoryChart::new(kind).view(state, self.range, self.period, &self.theme));
        }
        content.into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let tick  = iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick);
        let close = iced::window::close_events().map(|_| Message::Shutdown);

        Subscription::batch([tick, close, Subscription::run(poll_stream)])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color:       self.theme.foreground.to_iced(),
        }
    }
}

// ── Subscription streams ──────────────────────────────────────────────────────

/// Runs the poller under a child of the session token and forwards every
/// completed cycle. Stalls once the poller stops.
fn poll_stream() -> impl iced::futures::Stream<Item = Message> {
    iced::stream::channel(4, |mut sender: Sender<Message>| async move {
        let launch = launch();
        let api    = &launch.config.api;

        match MetricsClient::new(&api.base_url, api.timeout()) {
            Ok(client) => {
                let poller = Poller::new(client, launch.config.polling.period())
                    .with_cluster(api.cluster);
                let mut rx = poller.spawn(launch.cancel.child_token());

                while let Some(cycle) = rx.recv().await {
                    if sender.send(Message::PollCompleted(cycle)).await.is_err() {
                        break;
                    }
                }
                info!("Poller stopped");
            }
            Err(e) => error!("Cannot start poller: {e}"),
        }

        loop {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
    })
}
