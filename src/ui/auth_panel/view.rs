// SPDX-License-Identifier: MPL-2.0
//! Header bar and panel widgets.

use super::{element, HitRegion};
use crate::application::port::{ElementId, StatusDisplay};
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{
    button, container, mouse_area, text_input, Column, Container, Id, Row, Text,
};
use iced::{
    alignment::{Horizontal, Vertical},
    Background, Border, Color, Element, Length, Theme,
};

/// Contextual data needed to render the header bar and the panel.
pub struct ViewContext<'a> {
    pub status: &'a StatusDisplay,
    pub panel_open: bool,
    /// Element holding the logical focus, highlighted with a ring.
    pub focused: Option<ElementId>,
    pub user_id: &'a str,
    pub password: &'a str,
    pub acting_user: &'a str,
    /// A login request is in flight; the login button is disabled.
    pub login_pending: bool,
}

/// Messages emitted by the header bar and the panel.
#[derive(Debug, Clone)]
pub enum Message {
    TogglePressed,
    UserIdChanged(String),
    PasswordChanged(String),
    LoginPressed,
    LogoutPressed,
    ActingUserChanged(String),
    ActingUserSubmitted,
    /// The pointer moved over the toggle or the panel.
    PointerEntered(HitRegion),
    /// The pointer left the toggle or the panel.
    PointerLeft,
}

/// Returns the iced widget id of a text field.
#[must_use]
pub fn widget_id(id: ElementId) -> Id {
    Id::new(id.as_str())
}

/// Renders the header bar, with the panel below it when open.
pub fn view<'a>(ctx: ViewContext<'a>) -> Element<'a, Message> {
    let mut content = Column::new()
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .push(build_header(&ctx));

    if ctx.panel_open {
        content = content.push(build_panel(&ctx));
    }

    content.into()
}

fn build_header<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let status = Text::new(ctx.status.status_text)
        .size(typography::CAPTION)
        .style(|theme: &Theme| iced::widget::text::Style {
            color: Some(Color {
                a: opacity::OVERLAY_STRONG,
                ..theme.palette().text
            }),
        });

    let mut toggle_content = Row::new()
        .spacing(spacing::XS)
        .align_y(Vertical::Center);
    if let Some(initials) = &ctx.status.avatar_initials {
        toggle_content = toggle_content.push(avatar(initials));
    }
    toggle_content = toggle_content.push(Text::new(ctx.status.account_label.clone()));

    let toggle_focused = ctx.focused == Some(element::TOGGLE);
    let toggle = button(toggle_content)
        .on_press(Message::TogglePressed)
        .padding([spacing::XXS, spacing::SM])
        .style(move |theme: &Theme, status| toggle_style(theme, status, toggle_focused));

    let toggle = mouse_area(toggle)
        .on_enter(Message::PointerEntered(HitRegion::Toggle))
        .on_exit(Message::PointerLeft);

    let bar = Row::new()
        .spacing(spacing::SM)
        .align_y(Vertical::Center)
        .push(status)
        .push(toggle);

    Container::new(bar)
        .width(Length::Fill)
        .align_x(Horizontal::Right)
        .padding(spacing::XS)
        .into()
}

fn build_panel<'a>(ctx: &ViewContext<'a>) -> Element<'a, Message> {
    let mut panel = Column::new().spacing(spacing::SM);

    if ctx.status.login_visible {
        let user_id = text_input("User id", ctx.user_id)
            .id(widget_id(element::USER_ID))
            .on_input(Message::UserIdChanged)
            .on_submit(Message::LoginPressed)
            .width(Length::Fixed(sizing::INPUT_WIDTH));
        let password = text_input("Password", ctx.password)
            .id(widget_id(element::PASSWORD))
            .secure(true)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::LoginPressed)
            .width(Length::Fixed(sizing::INPUT_WIDTH));

        let login_focused = ctx.focused == Some(element::LOGIN);
        let login = button(Text::new("Log in").size(typography::BODY))
            .on_press_maybe((!ctx.login_pending).then_some(Message::LoginPressed))
            .padding([spacing::XXS, spacing::MD])
            .style(move |theme: &Theme, status| action_style(theme, status, login_focused));

        panel = panel.push(user_id).push(password).push(login);
    }

    if ctx.status.logout_visible {
        let acting_user = text_input("Acting user id", ctx.acting_user)
            .id(widget_id(element::ACTING_USER))
            .on_input(Message::ActingUserChanged)
            .on_submit(Message::ActingUserSubmitted)
            .width(Length::Fixed(sizing::INPUT_WIDTH));

        let logout_focused = ctx.focused == Some(element::LOGOUT);
        let logout = button(Text::new("Log out").size(typography::BODY))
            .on_press(Message::LogoutPressed)
            .padding([spacing::XXS, spacing::MD])
            .style(move |theme: &Theme, status| action_style(theme, status, logout_focused));

        panel = panel.push(acting_user).push(logout);
    }

    let panel = Container::new(panel)
        .width(Length::Fixed(sizing::PANEL_WIDTH))
        .padding(spacing::MD)
        .style(panel_style);

    mouse_area(panel)
        .on_enter(Message::PointerEntered(HitRegion::Panel))
        .on_exit(Message::PointerLeft)
        .into()
}

fn avatar<'a>(initials: &str) -> Element<'a, Message> {
    Container::new(Text::new(initials.to_string()).size(typography::CAPTION))
        .width(Length::Fixed(sizing::AVATAR))
        .height(Length::Fixed(sizing::AVATAR))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center)
        .style(|_theme: &Theme| container::Style {
            background: Some(Background::Color(palette::PRIMARY_700)),
            text_color: Some(palette::WHITE),
            border: Border {
                radius: radius::FULL.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn focus_ring(focused: bool) -> Border {
    Border {
        color: if focused {
            palette::PRIMARY_500
        } else {
            Color::TRANSPARENT
        },
        width: border::WIDTH_MD,
        radius: radius::SM.into(),
    }
}

fn toggle_style(theme: &Theme, status: button::Status, focused: bool) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Some(Background::Color(Color {
            a: opacity::OVERLAY_SUBTLE,
            ..palette::GRAY_400
        })),
        button::Status::Active | button::Status::Disabled => None,
    };
    button::Style {
        background,
        text_color: base.text,
        border: focus_ring(focused),
        shadow: shadow::NONE,
        snap: true,
    }
}

fn action_style(theme: &Theme, status: button::Status, focused: bool) -> button::Style {
    let (background, text_color) = match status {
        button::Status::Active => (palette::PRIMARY_500, palette::WHITE),
        button::Status::Hovered | button::Status::Pressed => (palette::PRIMARY_700, palette::WHITE),
        button::Status::Disabled => (
            palette::GRAY_200,
            Color {
                a: opacity::OVERLAY_MEDIUM,
                ..theme.palette().text
            },
        ),
    };
    let mut ring = focus_ring(focused);
    if !focused {
        ring.color = background;
    }
    button::Style {
        background: Some(Background::Color(background)),
        text_color,
        border: ring,
        shadow: shadow::NONE,
        snap: true,
    }
}

fn panel_style(theme: &Theme) -> container::Style {
    let base = theme.extended_palette().background.base;
    container::Style {
        background: Some(Background::Color(base.color)),
        text_color: Some(base.text),
        border: Border {
            color: palette::GRAY_700,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        shadow: shadow::MD,
        ..Default::default()
    }
}
