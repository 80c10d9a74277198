// SPDX-License-Identifier: MPL-2.0
//! Positioned stack of toasts bound to a notification manager.
//!
//! Mounting subscribes to the manager; the listener only stores the latest
//! snapshot in a `watch` channel, which the container picks up on its next
//! tick. The subscription is released when the container is dropped.
//!
//! The registry is the single source of truth: a toast whose id is missing
//! from the latest snapshot starts its exit transition even if nobody
//! pressed its dismiss button (timer expiry, `clear()` from elsewhere).

use super::design_tokens::spacing;
use super::toast::{Message, Toast};
use crate::config::{NotificationsConfig, Position};
use crate::notifications::{
    CloseTransition, ListenerHandle, Notification, NotificationId, NotificationManager,
};
use iced::widget::{Column, Container};
use iced::{alignment, Element, Length};
use std::time::Instant;
use tokio::sync::watch;

/// View-side adapter between [`NotificationManager`] and rendered toasts.
#[derive(Debug)]
pub struct NotificationContainer {
    position: Position,
    transition: CloseTransition,
    updates: watch::Receiver<Vec<Notification>>,
    toasts: Vec<Toast>,
    subscription: ListenerHandle,
}

impl NotificationContainer {
    /// Subscribes to `manager` and seeds the stack with its current entries.
    #[must_use]
    pub fn mount(
        manager: &NotificationManager,
        position: Position,
        transition: CloseTransition,
    ) -> Self {
        let (sender, updates) = watch::channel(Vec::new());
        let subscription = manager.subscribe(move |snapshot| {
            sender.send_replace(snapshot);
        });

        let mut container = Self {
            position,
            transition,
            updates,
            toasts: Vec::new(),
            subscription,
        };
        container.reconcile(manager.notifications(), Instant::now());
        container
    }

    #[must_use]
    pub fn from_config(manager: &NotificationManager, config: &NotificationsConfig) -> Self {
        Self::mount(manager, config.position(), config.close_transition())
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Toasts currently rendered, including ones mid exit transition.
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Whether the container still receives snapshots from its manager.
    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }

    /// Handles a toast message.
    pub fn update(&mut self, message: Message) {
        match message {
            Message::Dismiss(id) => self.dismiss(id, Instant::now()),
            Message::Tick(now) => self.tick(now),
            // Actions carry no lifecycle meaning; the host reacts to them.
            Message::Action { .. } => {}
        }
    }

    /// Starts the exit transition of one toast.
    pub fn dismiss(&mut self, id: NotificationId, now: Instant) {
        if let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id() == id) {
            toast.begin_close(now);
        }
    }

    /// Picks up the latest snapshot and advances exit transitions.
    pub fn tick(&mut self, now: Instant) {
        self.sync(now);
        for toast in &mut self.toasts {
            toast.tick(now);
        }
        self.toasts.retain(Toast::is_visible);
    }

    /// Applies the latest snapshot if one arrived since the last call.
    ///
    /// Returns whether a snapshot was applied.
    pub fn sync(&mut self, now: Instant) -> bool {
        if !self.updates.has_changed().unwrap_or(false) {
            return false;
        }
        let snapshot = self.updates.borrow_and_update().clone();
        self.reconcile(snapshot, now);
        true
    }

    fn reconcile(&mut self, snapshot: Vec<Notification>, now: Instant) {
        for toast in &mut self.toasts {
            if !snapshot.iter().any(|n| n.id() == toast.id()) {
                toast.begin_close(now);
            }
        }

        // The registry only appends, so new ids always belong after the
        // toasts already on screen.
        for notification in snapshot {
            if !self.toasts.iter().any(|toast| toast.id() == notification.id()) {
                self.toasts.push(Toast::new(notification, self.transition));
            }
        }

        self.toasts.retain(Toast::is_visible);
    }

    /// Renders the stack, or nothing when there is no toast to show.
    pub fn view(&self, now: Instant) -> Option<Element<'_, Message>> {
        if self.toasts.is_empty() {
            return None;
        }

        let (horizontal, vertical) = anchor(self.position);
        let column = Column::with_children(self.toasts.iter().map(|toast| toast.view(now)))
            .spacing(spacing::XS)
            .align_x(horizontal);

        Some(
            Container::new(column)
                .width(Length::Fill)
                .height(Length::Fill)
                .align_x(horizontal)
                .align_y(vertical)
                .padding(spacing::MD)
                .into(),
        )
    }
}

fn anchor(position: Position) -> (alignment::Horizontal, alignment::Vertical) {
    use alignment::{Horizontal, Vertical};

    let vertical = if position.is_top() {
        Vertical::Top
    } else {
        Vertical::Bottom
    };
    let horizontal = match position {
        Position::TopLeft | Position::BottomLeft => Horizontal::Left,
        Position::TopCenter | Position::BottomCenter => Horizontal::Center,
        Position::TopRight | Position::BottomRight => Horizontal::Right,
    };
    (horizontal, vertical)
}
