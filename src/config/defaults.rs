// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Auto-close**: Default toast lifetime before self-removal
//! - **Close transition**: Exit animation delay of the toast widget
//! - **Logging**: Default tracing filter

// ==========================================================================
// Auto-close Defaults
// ==========================================================================

/// Default delay before an auto-closing notification removes itself (in milliseconds).
pub const DEFAULT_AUTO_CLOSE_DELAY_MS: u32 = 5000;

/// Minimum configurable auto-close delay (in milliseconds).
pub const MIN_AUTO_CLOSE_DELAY_MS: u32 = 500;

/// Maximum configurable auto-close delay (in milliseconds).
pub const MAX_AUTO_CLOSE_DELAY_MS: u32 = 60_000;

// ==========================================================================
// Close Transition Defaults
// ==========================================================================

/// Default exit animation delay between "closing" and removal (in milliseconds).
pub const DEFAULT_CLOSE_TRANSITION_MS: u32 = 200;

/// Minimum close transition (in milliseconds). Zero disables the animation.
pub const MIN_CLOSE_TRANSITION_MS: u32 = 0;

/// Maximum close transition (in milliseconds).
pub const MAX_CLOSE_TRANSITION_MS: u32 = 2000;

// ==========================================================================
// Logging Defaults
// ==========================================================================

/// Tracing filter used when neither `RUST_LOG` nor the settings file set one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_AUTO_CLOSE_DELAY_MS > 0);
    assert!(MAX_AUTO_CLOSE_DELAY_MS >= MIN_AUTO_CLOSE_DELAY_MS);
    assert!(DEFAULT_AUTO_CLOSE_DELAY_MS >= MIN_AUTO_CLOSE_DELAY_MS);
    assert!(DEFAULT_AUTO_CLOSE_DELAY_MS <= MAX_AUTO_CLOSE_DELAY_MS);

    assert!(MAX_CLOSE_TRANSITION_MS >= MIN_CLOSE_TRANSITION_MS);
    assert!(DEFAULT_CLOSE_TRANSITION_MS >= MIN_CLOSE_TRANSITION_MS);
    assert!(DEFAULT_CLOSE_TRANSITION_MS <= MAX_CLOSE_TRANSITION_MS);

    // The exit animation must finish well before the shortest toast expires.
    assert!(MAX_CLOSE_TRANSITION_MS < MIN_AUTO_CLOSE_DELAY_MS * 10);
};
