// SPDX-License-Identifier: MPL-2.0
//! View rendering for the dashboard.
//!
//! The toast stack is layered above the dashboard only while it has
//! something to show, so an empty container costs nothing in the tree.

use super::{BusinessEvent, Message};
use crate::ui::container::NotificationContainer;
use crate::ui::design_tokens::{palette, spacing, typography};
use iced::widget::{button, text, Column, Container, Row, Stack, Text};
use iced::{Element, Length, Theme};
use std::time::Instant;

/// Context required to render the application view.
pub struct ViewContext<'a> {
    pub container: &'a NotificationContainer,
    /// Notifications currently in the registry.
    pub active: usize,
    pub last_action: Option<&'a str>,
    pub now: Instant,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let dashboard = Container::new(dashboard(ctx.active, ctx.last_action))
        .width(Length::Fill)
        .height(Length::Fill);

    match ctx.container.view(ctx.now) {
        Some(toasts) => Stack::new()
            .push(dashboard)
            .push(toasts.map(Message::Notification))
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => dashboard.into(),
    }
}

fn dashboard<'a>(active: usize, last_action: Option<&'a str>) -> Element<'a, Message> {
    let heading = Text::new("BizDesk").size(typography::TITLE_MD);
    let summary = Text::new(match active {
        0 => "No active notifications".to_string(),
        1 => "1 active notification".to_string(),
        n => format!("{n} active notifications"),
    })
    .size(typography::BODY)
    .style(|_theme: &Theme| text::Style {
        color: Some(palette::GRAY_400),
    });

    let events = BusinessEvent::ALL
        .into_iter()
        .fold(Row::new().spacing(spacing::XS), |row, event| {
            row.push(
                button(Text::new(event.label()).size(typography::BODY))
                    .on_press(Message::Raise(event))
                    .style(button::primary),
            )
        });

    let clear = button(Text::new("Clear all").size(typography::BODY))
        .on_press_maybe((active > 0).then_some(Message::ClearAll))
        .style(button::secondary);

    let mut content = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .push(heading)
        .push(summary)
        .push(events)
        .push(clear);

    if let Some(key) = last_action {
        content = content.push(
            Text::new(format!("Last action: {key}"))
                .size(typography::BODY_SM)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::PRIMARY_500),
                }),
        );
    }

    content.into()
}
