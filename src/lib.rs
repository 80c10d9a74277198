// SPDX-License-Identifier: MPL-2.0
//! `bizdesk` is the front-office dashboard of a small-business management
//! suite, built with the Iced GUI framework.
//!
//! Its core is the [`notifications`] module: a toast registry that any part of
//! the application can publish transient messages to, with auto-dismiss timers
//! and ordered snapshot delivery to subscribed views. The [`ui`] module renders
//! those snapshots as a positioned toast stack.

#![doc(html_root_url = "https://docs.rs/bizdesk/0.3.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod notifications;
pub mod ui;
