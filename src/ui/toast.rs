// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! A `Toast` wraps one notification snapshot plus two local flags,
//! `visible` and `closing`. Closing is two-phase: the dismiss button (or the
//! container, when the entry left the registry) flips `closing` at once so
//! the card fades, and after the close transition `visible` drops and the
//! notification's close capability is invoked. The registry is never touched
//! directly.

use super::design_tokens::{border, opacity, palette, radius, shadow, sizing, spacing, typography};
use crate::notifications::{CloseTransition, Notification, NotificationId};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, Color, Element, Length, Theme};
use std::time::Instant;

/// Messages emitted by toast widgets.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// The dismiss button of a toast was pressed.
    Dismiss(NotificationId),
    /// An action button of a toast was pressed.
    Action { id: NotificationId, key: String },
    /// Periodic tick driving close transitions and snapshot pickup.
    Tick(Instant),
}

/// Lifecycle of one toast as seen by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    Closing,
    Removed,
}

/// View state of a single notification.
#[derive(Debug, Clone)]
pub struct Toast {
    notification: Notification,
    transition: CloseTransition,
    visible: bool,
    closing: bool,
    closing_since: Option<Instant>,
}

impl Toast {
    #[must_use]
    pub fn new(notification: Notification, transition: CloseTransition) -> Self {
        Self {
            notification,
            transition,
            visible: true,
            closing: false,
            closing_since: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.notification.id()
    }

    #[must_use]
    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        if !self.visible {
            Phase::Removed
        } else if self.closing {
            Phase::Closing
        } else {
            Phase::Active
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_closing(&self) -> bool {
        self.closing
    }

    /// Starts the exit transition. No-op once closing or removed.
    pub fn begin_close(&mut self, now: Instant) {
        if self.closing || !self.visible {
            return;
        }
        self.closing = true;
        self.closing_since = Some(now);
        if self.transition.is_instant() {
            self.finish();
        }
    }

    /// Completes the exit transition once it has run for its full duration.
    ///
    /// Returns true on the tick that removed the toast.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.closing_since {
            Some(since)
                if self.visible
                    && now.saturating_duration_since(since) >= self.transition.as_duration() =>
            {
                self.finish();
                true
            }
            _ => false,
        }
    }

    fn finish(&mut self) {
        self.visible = false;
        self.notification.close();
    }

    /// Renders the toast card.
    pub fn view(&self, now: Instant) -> Element<'_, Message> {
        let notification = &self.notification;
        let id = notification.id();
        let accent = notification.variant().color();
        let fade = if self.closing {
            opacity::OVERLAY_MEDIUM
        } else {
            opacity::OPAQUE
        };

        let icon = Text::new(notification.icon())
            .size(typography::TITLE_SM)
            .style(move |_theme: &Theme| text::Style {
                color: Some(with_alpha(accent, fade)),
            });

        let mut body = Column::new().spacing(spacing::XXS).width(Length::Fill);
        if let Some(title) = notification.title() {
            body = body.push(
                Text::new(title)
                    .size(typography::BODY_LG)
                    .style(move |theme: &Theme| text::Style {
                        color: Some(with_alpha(theme.palette().text, fade)),
                    }),
            );
        }
        if let Some(description) = notification.description() {
            body = body.push(
                Text::new(description)
                    .size(typography::BODY_SM)
                    .style(move |theme: &Theme| text::Style {
                        color: Some(with_alpha(theme.palette().text, fade * 0.8)),
                    }),
            );
        }
        if !notification.actions().is_empty() {
            let mut actions = Row::new().spacing(spacing::XS);
            for action in notification.actions() {
                let pressed = (!self.closing).then(|| Message::Action {
                    id,
                    key: action.key.clone(),
                });
                actions = actions.push(
                    button(Text::new(action.label.as_str()).size(typography::CAPTION))
                        .on_press_maybe(pressed)
                        .padding(spacing::XXS)
                        .style(move |theme: &Theme, status| {
                            action_button_style(theme, status, accent)
                        }),
                );
            }
            body = body.push(actions);
        }

        let dismiss_button = button(Text::new("×").size(typography::BODY))
            .on_press_maybe((!self.closing).then_some(Message::Dismiss(id)))
            .padding(spacing::XXS)
            .style(dismiss_button_style);

        // Layout: [icon] [title/description/actions] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Center)
            .push(Container::new(icon).padding(spacing::XXS))
            .push(body)
            .push(dismiss_button);

        let mut card = Column::new().spacing(spacing::XS).push(content);
        if let Some(fraction) = notification.remaining_fraction(now) {
            card = card.push(countdown_bar(fraction, with_alpha(accent, fade)));
        }

        Container::new(card)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| toast_container_style(theme, accent, fade))
            .into()
    }
}

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

/// Thin bar shrinking with the remaining auto-close time.
fn countdown_bar<'a>(fraction: f32, color: Color) -> Element<'a, Message> {
    let track = sizing::TOAST_WIDTH - 2.0 * spacing::SM;
    let bar: Container<'a, Message> = Container::new(Column::<'a, Message>::new())
        .width(Length::Fixed(track * fraction.clamp(0.0, 1.0)))
        .height(Length::Fixed(sizing::COUNTDOWN_HEIGHT))
        .style(move |_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(color)),
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            ..Default::default()
        });
    bar.into()
}

/// Style function for the toast container.
fn toast_container_style(theme: &Theme, accent_color: Color, fade: f32) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(with_alpha(bg_color, fade))),
        border: iced::Border {
            color: with_alpha(accent_color, fade),
            width: border::WIDTH_MD,
            radius: radius::MD.into(),
        },
        shadow: if fade < opacity::OPAQUE {
            shadow::NONE
        } else {
            shadow::MD
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

/// Style function for action buttons.
fn action_button_style(theme: &Theme, status: button::Status, accent: Color) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Some(iced::Background::Color(
            with_alpha(accent, opacity::OVERLAY_SUBTLE),
        )),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background,
        text_color: if status == button::Status::Disabled {
            with_alpha(base.text, opacity::OVERLAY_MEDIUM)
        } else {
            accent
        },
        border: iced::Border {
            color: accent,
            width: border::WIDTH_SM,
            radius: radius::SM.into(),
        },
        shadow: shadow::NONE,
        snap: true,
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: Some(iced::Background::Color(Color {
                a: if status == button::Status::Pressed {
                    opacity::OVERLAY_MEDIUM
                } else {
                    opacity::OVERLAY_SUBTLE
                },
                ..palette::GRAY_400
            })),
            text_color: base.text,
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: with_alpha(base.text, opacity::OVERLAY_MEDIUM),
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
