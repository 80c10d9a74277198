// SPDX-License-Identifier: MPL-2.0
//! Application root state for the BizDesk dashboard.
//!
//! The `App` struct owns the notification manager and the toast container
//! mounted on it. Dashboard buttons stand in for the business screens and
//! report their outcome through the manager, exactly as a form handler would.

mod events;
mod message;
pub mod paths;
mod subscription;
mod view;

pub use events::BusinessEvent;
pub use message::{Flags, Message};

use crate::config::Config;
use crate::notifications::{ManagerSettings, NotificationManager, NotificationOptions};
use crate::ui::container::NotificationContainer;
use crate::ui::toast;
use iced::{window, Element, Subscription, Task, Theme};
use std::fmt;
use std::time::Instant;

/// Root Iced application state.
pub struct App {
    manager: NotificationManager,
    container: NotificationContainer,
    /// Documents issued so far, used to number invoices.
    issued: u32,
    /// Key of the last toast action the user pressed.
    last_action: Option<String>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("notifications", &self.manager.len())
            .field("toasts", &self.container.toasts().len())
            .field("issued", &self.issued)
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 600;
pub const WINDOW_DEFAULT_WIDTH: u32 = 900;
pub const MIN_WINDOW_HEIGHT: u32 = 420;
pub const MIN_WINDOW_WIDTH: u32 = 560;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced 0.14 requires a `Fn` boot closure; the flags are cheap to clone.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags {
            config,
            config_warning,
            runtime,
        } = flags;

        let mut app = Self::with_manager(
            &config,
            NotificationManager::on_runtime(ManagerSettings::from(&config.notifications), runtime),
        );

        if let Some(warning) = config_warning {
            app.manager
                .warning(&warning, None, NotificationOptions::default());
        }

        app.container.sync(Instant::now());
        (app, Task::none())
    }

    fn with_manager(config: &Config, manager: NotificationManager) -> Self {
        let container = NotificationContainer::from_config(&manager, &config.notifications);
        Self {
            manager,
            container,
            issued: 0,
            last_action: None,
        }
    }

    fn title(&self) -> String {
        match self.manager.len() {
            0 => paths::APP_NAME.to_string(),
            n => format!("{} ({n})", paths::APP_NAME),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Raise(event) => {
                self.issued = self.issued.saturating_add(1);
                let id = event.raise(&self.manager, self.issued);
                tracing::debug!(%id, ?event, "business event reported");
                self.container.sync(Instant::now());
            }
            Message::ClearAll => {
                self.manager.clear();
                self.container.sync(Instant::now());
            }
            Message::Notification(toast::Message::Action { id, key }) => {
                tracing::info!(%id, %key, "notification action pressed");
                self.last_action = Some(key);
                // Acting on a toast settles it.
                self.container.dismiss(id, Instant::now());
            }
            Message::Notification(message) => self.container.update(message),
            Message::Tick(now) => self.container.tick(now),
        }
        Task::none()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            container: &self.container,
            active: self.manager.len(),
            last_action: self.last_action.as_deref(),
            now: Instant::now(),
        })
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::tick(!self.container.is_empty() || !self.manager.is_empty())
    }
}
