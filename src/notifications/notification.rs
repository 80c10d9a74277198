// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` snapshot type, the `Variant`
//! severity enum, and the `NotificationSpec` / `NotificationOptions`
//! builders callers use to describe a toast.

use super::manager::CloseHandle;
use crate::ui::design_tokens::palette;
use iced::Color;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Unique identifier for a notification.
///
/// Issued by a [`NotificationManager`](super::NotificationManager) from a
/// monotonic counter, so an id is never reused by the manager that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Visual severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    #[default]
    Default,
    Success,
    Error,
    Warning,
    Info,
}

impl Variant {
    /// Returns the accent color for this variant.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Variant::Default => palette::GRAY_400,
            Variant::Success => palette::SUCCESS_500,
            Variant::Error => palette::ERROR_500,
            Variant::Warning => palette::WARNING_500,
            Variant::Info => palette::INFO_500,
        }
    }

    /// Glyph shown when the notification has no icon override.
    #[must_use]
    pub fn default_icon(self) -> &'static str {
        match self {
            Variant::Default => "•",
            Variant::Success => "✓",
            Variant::Error => "✕",
            Variant::Warning => "!",
            Variant::Info => "i",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Default => "default",
            Variant::Success => "success",
            Variant::Error => "error",
            Variant::Warning => "warning",
            Variant::Info => "info",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A button rendered inside a toast. Carries no lifecycle meaning; pressing
/// it is reported back to the host application.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Action {
    pub key: String,
    pub label: String,
}

impl Action {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Optional settings shared by [`NotificationSpec`] and the severity helpers
/// of the manager.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationOptions {
    /// `None` means "use the default": true, except for errors.
    pub auto_close: Option<bool>,
    /// `None` means the manager's configured default delay.
    pub auto_close_delay: Option<Duration>,
    pub icon: Option<String>,
    pub actions: Vec<Action>,
    pub attributes: BTreeMap<String, String>,
}

impl NotificationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = Some(auto_close);
        self
    }

    #[must_use]
    pub fn auto_close_delay(mut self, delay: Duration) -> Self {
        self.auto_close_delay = Some(delay);
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Description of a notification to show.
///
/// An empty spec (no title, no description) is accepted and renders as an
/// empty toast.
///
/// # Example
///
/// ```
/// use bizdesk::notifications::{NotificationSpec, Variant};
/// use std::time::Duration;
///
/// let spec = NotificationSpec::new(Variant::Success)
///     .title("Invoice saved")
///     .description("INV-2024-0042 was sent to the customer")
///     .auto_close_delay(Duration::from_secs(3));
/// assert_eq!(spec.variant, Variant::Success);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationSpec {
    pub variant: Variant,
    pub title: Option<String>,
    pub description: Option<String>,
    pub options: NotificationOptions,
}

impl NotificationSpec {
    #[must_use]
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn auto_close(mut self, auto_close: bool) -> Self {
        self.options.auto_close = Some(auto_close);
        self
    }

    #[must_use]
    pub fn auto_close_delay(mut self, delay: Duration) -> Self {
        self.options.auto_close_delay = Some(delay);
        self
    }

    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.options.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.options.actions.push(action);
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.attributes.insert(key.into(), value.into());
        self
    }

    /// Replaces all options at once.
    #[must_use]
    pub fn with_options(mut self, options: NotificationOptions) -> Self {
        self.options = options;
        self
    }
}

/// A registered notification, as delivered to subscribers.
///
/// Snapshots are independent clones; mutating one never affects the
/// manager's registry. The only way back into the registry is
/// [`Notification::close`].
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    variant: Variant,
    title: Option<String>,
    description: Option<String>,
    auto_close: bool,
    auto_close_delay: Duration,
    icon: Option<String>,
    actions: Vec<Action>,
    attributes: BTreeMap<String, String>,
    created_at: Instant,
    on_close: CloseHandle,
}

impl Notification {
    pub(crate) fn from_spec(
        id: NotificationId,
        spec: NotificationSpec,
        default_delay: Duration,
        on_close: CloseHandle,
    ) -> Self {
        let NotificationSpec {
            variant,
            title,
            description,
            options,
        } = spec;

        Self {
            id,
            variant,
            title,
            description,
            auto_close: options.auto_close.unwrap_or(true),
            auto_close_delay: options.auto_close_delay.unwrap_or(default_delay),
            icon: options.icon,
            actions: options.actions,
            attributes: options.attributes,
            created_at: Instant::now(),
            on_close,
        }
    }

    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    #[must_use]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn auto_close(&self) -> bool {
        self.auto_close
    }

    #[must_use]
    pub fn auto_close_delay(&self) -> Duration {
        self.auto_close_delay
    }

    /// Icon override, falling back to the variant glyph.
    #[must_use]
    pub fn icon(&self) -> &str {
        self.icon
            .as_deref()
            .unwrap_or_else(|| self.variant.default_icon())
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    /// True when neither title nor description carries text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.title.as_deref().is_none_or(str::is_empty)
            && self.description.as_deref().is_none_or(str::is_empty)
    }

    /// Fraction of the auto-close delay still remaining at `now`, in `0.0..=1.0`.
    ///
    /// Cosmetic only: the manager's timer decides when the entry is removed.
    /// Returns `None` for notifications that do not auto-close.
    #[must_use]
    pub fn remaining_fraction(&self, now: Instant) -> Option<f32> {
        if !self.auto_close {
            return None;
        }
        if self.auto_close_delay.is_zero() {
            return Some(0.0);
        }
        let elapsed = now.saturating_duration_since(self.created_at);
        let remaining = self.auto_close_delay.saturating_sub(elapsed);
        Some(remaining.as_secs_f32() / self.auto_close_delay.as_secs_f32())
    }

    /// Asks the issuing manager to dismiss this notification.
    ///
    /// Only the first call on any clone of this notification has an effect;
    /// once the entry has left the registry the call is a no-op.
    pub fn close(&self) {
        self.on_close.close();
    }

    /// Returns whether the entry has been removed or a close was requested.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.on_close.is_closed()
    }

    pub(crate) fn close_handle(&self) -> &CloseHandle {
        &self.on_close
    }
}

impl PartialEq for Notification {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.variant == other.variant
            && self.title == other.title
            && self.description == other.description
            && self.auto_close == other.auto_close
            && self.auto_close_delay == other.auto_close_delay
            && self.icon == other.icon
            && self.actions == other.actions
            && self.attributes == other.attributes
            && self.created_at == other.created_at
    }
}
