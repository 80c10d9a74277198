// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.

use super::Message;
use iced::{time, Subscription};
use std::time::Duration;

/// Frame interval for toast transitions and snapshot pickup.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Periodic tick, active only while there is something to animate or
/// a snapshot may still arrive.
pub fn tick(active: bool) -> Subscription<Message> {
    if active {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
