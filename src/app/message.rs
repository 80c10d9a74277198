// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::config::Config;
use crate::ui::toast;
use std::time::Instant;

use super::events::BusinessEvent;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// A dashboard button simulating an application outcome.
    Raise(BusinessEvent),
    ClearAll,
    Notification(toast::Message),
    Tick(Instant), // Periodic tick for toast transitions
}

/// Runtime inputs prepared by `main` before the window opens.
#[derive(Debug, Clone)]
pub struct Flags {
    pub config: Config,
    /// Warning produced while loading `settings.toml`, shown as a toast.
    pub config_warning: Option<String>,
    /// Runtime driving auto-dismiss timers.
    pub runtime: tokio::runtime::Handle,
}
