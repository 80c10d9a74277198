// SPDX-License-Identifier: MPL-2.0
//! Toast notification core.
//!
//! Any part of the client raises feedback through a shared
//! [`NotificationManager`]: "invoice saved", "sync failed", "low stock".
//! The manager keeps the ordered list of active toasts, broadcasts a fresh
//! snapshot to every subscriber on each change, and removes auto-closing
//! entries when their timer elapses.
//!
//! # Components
//!
//! - [`notification`] - `Notification` snapshot, `Variant`, spec builders
//! - [`manager`] - `NotificationManager` registry, listeners, close handles
//! - [`scheduler`] - Cancellable deferred callbacks (tokio or tick driven)
//! - [`timing`] - Validated delay newtypes
//!
//! # Usage
//!
//! ```
//! use bizdesk::notifications::{NotificationManager, NotificationOptions, TickScheduler};
//! use std::sync::Arc;
//!
//! let manager = NotificationManager::new(Arc::new(TickScheduler::new()));
//!
//! // Errors stay until the user dismisses them
//! let id = manager.error("Sync failed", Some("Check your connection"), NotificationOptions::default());
//! assert!(!manager.get(id).unwrap().auto_close());
//!
//! manager.dismiss(id);
//! assert!(manager.is_empty());
//! ```
//!
//! # Policy
//!
//! - Default lifetime 5s, configurable in `settings.toml`
//! - Errors require manual dismissal unless the caller opts in
//! - Dismissal is idempotent; unknown ids are ignored

pub mod manager;
pub mod notification;
pub mod scheduler;
pub mod timing;

pub use manager::{CloseHandle, Listener, ListenerHandle, ManagerSettings, NotificationManager};
pub use notification::{
    Action, Notification, NotificationId, NotificationOptions, NotificationSpec, Variant,
};
pub use scheduler::{DeferredTask, Scheduler, TickScheduler, TimerHandle, TokioScheduler};
pub use timing::{AutoCloseDelay, CloseTransition};
