use crate::colors::Color;
use iced::widget::container;
use iced::{Background, Border};

/// Container style for a dashboard card: faint fill, thin outline.
pub fn card(foreground: Color) -> impl Fn(&iced::Theme) -> container::Style {
    let fill    = foreground.with_alpha(0.05).to_iced();
    let outline = foreground.with_alpha(0.15).to_iced();

    move |_: &iced::Theme| container::Style {
        background: Some(Background::Color(fill)),
        border: Border { radius: 8.0.into(), width: 1.0, color: outline },
        ..Default::default()
    }
}

/// Solid rounded block, used for chart bars and usage meters.
pub fn filled(color: Color) -> impl Fn(&iced::Theme) -> container::Style {
    let fill = color.to_iced();

    move |_: &iced::Theme| container::Style {
        background: Some(Background::Color(fill)),
        border: Border { radius: 2.0.into(), ..Default::default() },
        ..Default::default()
    }
}
