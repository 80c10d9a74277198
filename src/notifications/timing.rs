// SPDX-License-Identifier: MPL-2.0
//! Validated timing newtypes for toast lifetimes.
//!
//! These bound the values read from `settings.toml`. Delays passed directly
//! by callers through [`NotificationOptions`](super::NotificationOptions) are
//! taken as given.

use crate::config::{
    DEFAULT_AUTO_CLOSE_DELAY_MS, DEFAULT_CLOSE_TRANSITION_MS, MAX_AUTO_CLOSE_DELAY_MS,
    MAX_CLOSE_TRANSITION_MS, MIN_AUTO_CLOSE_DELAY_MS, MIN_CLOSE_TRANSITION_MS,
};
use std::time::Duration;

/// Default lifetime of an auto-closing notification, in milliseconds.
///
/// # Example
///
/// ```
/// use bizdesk::notifications::AutoCloseDelay;
///
/// assert_eq!(AutoCloseDelay::default().value(), 5000);
///
/// // Values outside range are clamped
/// assert_eq!(AutoCloseDelay::new(1).value(), 500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AutoCloseDelay(u32);

impl AutoCloseDelay {
    /// Creates a new delay, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u32) -> Self {
        Self(millis.clamp(MIN_AUTO_CLOSE_DELAY_MS, MAX_AUTO_CLOSE_DELAY_MS))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }
}

impl Default for AutoCloseDelay {
    fn default() -> Self {
        Self(DEFAULT_AUTO_CLOSE_DELAY_MS)
    }
}

/// Exit animation delay of the toast widget, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CloseTransition(u32);

impl CloseTransition {
    /// Creates a new transition, clamping to the valid range.
    #[must_use]
    pub fn new(millis: u32) -> Self {
        Self(millis.clamp(MIN_CLOSE_TRANSITION_MS, MAX_CLOSE_TRANSITION_MS))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(u64::from(self.0))
    }

    /// Returns true when toasts are removed without an exit animation.
    #[must_use]
    pub fn is_instant(self) -> bool {
        self.0 == 0
    }
}

impl Default for CloseTransition {
    fn default() -> Self {
        Self(DEFAULT_CLOSE_TRANSITION_MS)
    }
}
