// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are small cards with a severity-colored accent and a dismiss
//! button. The whole card reports pointer enter/leave so the manager can
//! pause its dismiss timer, and it fades out while exiting.

use super::manager::{Manager, Message};
use super::notification::Notification;
use crate::application::port::NotificationSurface;
use crate::domain::notification::{NotificationId, Severity};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{button, container, mouse_area, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::Instant;

/// Interaction reported by a rendered toast.
///
/// Widgets carry no timestamps, so the host stamps each event with
/// [`ToastEvent::at`] before passing it to the [`Manager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastEvent {
    Dismissed(NotificationId),
    PointerEntered(NotificationId),
    PointerLeft(NotificationId),
}

impl ToastEvent {
    /// Converts the event into a manager message observed at `now`.
    #[must_use]
    pub fn at(self, now: Instant) -> Message {
        match self {
            Self::Dismissed(id) => Message::Dismiss(id),
            Self::PointerEntered(id) => Message::PointerEntered(id),
            Self::PointerLeft(id) => Message::PointerLeft(id, now),
        }
    }
}

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast notification at the given opacity.
    pub fn view(notification: &Notification, alpha: f32) -> Element<'_, ToastEvent> {
        let severity = notification.severity();
        let accent_color = fade(accent(severity), alpha);
        let id = notification.id();

        let marker = Text::new(glyph(severity))
            .size(typography::BODY)
            .style(move |_theme: &Theme| text::Style {
                color: Some(accent_color),
            });

        let message_widget = Text::new(notification.message())
            .size(typography::BODY)
            .style(move |theme: &Theme| text::Style {
                color: Some(fade(theme.palette().text, alpha)),
            });

        let dismiss_button = button(Text::new("×").size(typography::BODY))
            .on_press(ToastEvent::Dismissed(id))
            .padding(spacing::XXS)
            .style(dismiss_button_style);

        // Layout: [marker] [message] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(marker).padding(spacing::XXS))
            .push(
                Container::new(message_widget)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        let card = Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent_color, alpha));

        mouse_area(card)
            .on_enter(ToastEvent::PointerEntered(id))
            .on_exit(ToastEvent::PointerLeft(id))
            .into()
    }

    /// Renders the toast overlay with all live notifications.
    ///
    /// Toasts are stacked in the bottom-right corner, oldest on top.
    /// `alpha_of` gives the current opacity of each toast.
    pub fn view_overlay<'a, S, F>(manager: &'a Manager<S>, alpha_of: F) -> Element<'a, ToastEvent>
    where
        S: NotificationSurface,
        F: Fn(NotificationId) -> f32,
    {
        let toasts: Vec<Element<'a, ToastEvent>> = manager
            .live()
            .map(|notification| Self::view(notification, alpha_of(notification.id())))
            .collect();

        if toasts.is_empty() {
            return Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        let toast_column = Column::with_children(toasts)
            .spacing(spacing::XS)
            .align_x(alignment::Horizontal::Right);

        Container::new(toast_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(alignment::Horizontal::Right)
            .align_y(alignment::Vertical::Bottom)
            .padding(spacing::MD)
            .into()
    }
}

/// Returns the accent color for a severity.
#[must_use]
pub fn accent(severity: Severity) -> Color {
    match severity {
        Severity::Info => palette::INFO_500,
        Severity::Warn => palette::WARNING_500,
        Severity::Error => palette::ERROR_500,
        Severity::Success => palette::SUCCESS_500,
    }
}

fn glyph(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "i",
        Severity::Warn | Severity::Error => "!",
        Severity::Success => "✓",
    }
}

fn fade(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha.clamp(opacity::TRANSPARENT, opacity::OPAQUE),
        ..color
    }
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color, alpha: f32) -> container::Style {
    let bg_color = fade(theme.extended_palette().background.base.color, alpha);

    container::Style {
        background: Some(iced::Background::Color(bg_color)),
        border: iced::Border {
            color: accent_color,
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: if alpha < opacity::OPAQUE {
            shadow::NONE
        } else {
            shadow::MD
        },
        text_color: Some(fade(theme.palette().text, alpha)),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover_background = |a: f32| {
        Some(iced::Background::Color(Color {
            a,
            ..palette::GRAY_400
        }))
    };
    let rounded = iced::Border {
        radius: radius::SM.into(),
        ..Default::default()
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered => button::Style {
            background: hover_background(opacity::OVERLAY_SUBTLE),
            text_color: base.text,
            border: rounded,
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Pressed => button::Style {
            background: hover_background(opacity::OVERLAY_MEDIUM),
            text_color: base.text,
            border: rounded,
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: fade(base.text, opacity::OVERLAY_MEDIUM),
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
