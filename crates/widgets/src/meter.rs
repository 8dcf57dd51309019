use clustory_core::Message;
use clustory_theme::{style, Color, Theme};
use iced::{
    widget::{container, row, text},
    Element, Length,
};

/// Horizontal usage meter filled to `percent` (clamped to 0 – 100).
pub fn usage_meter<'a>(percent: f64, color: Color, theme: &Theme) -> Element<'a, Message> {
    let filled = percent.clamp(0.0, 100.0).round() as u16;
    let track  = theme.foreground.with_alpha(0.12);

    row![
        container(text(""))
            .width(Length::FillPortion(filled))
            .height(Length::Fixed(6.0))
            .style(style::filled(color)),
        container(text(""))
            .width(Length::FillPortion(100 - filled))
            .height(Length::Fixed(6.0))
            .style(style::filled(track)),
    ]
    .width(Length::Fill)
    .into()
}
