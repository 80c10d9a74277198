// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Follows the Elm-style "state down, messages up" pattern: widgets own
//! presentation state and emit messages, the host routes them back.
//!
//! - [`toast`] - A single rendered notification with its exit transition
//! - [`container`] - Positioned toast stack bound to a notification manager
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)

pub mod container;
pub mod design_tokens;
pub mod toast;
