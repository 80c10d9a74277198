// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Logging filter
//! - `[notifications]` - Toast lifetime, exit transition and screen anchor
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` on the command line
//! 3. Set `BIZDESK_CONFIG_DIR` environment variable
//! 4. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use bizdesk::config::{self, Config, Position};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.notifications.position = Some(Position::TopRight);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use crate::notifications::{AutoCloseDelay, CloseTransition};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Screen anchor of the toast stack.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

impl Position {
    /// Whether the stack grows downward from the top edge.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(
            self,
            Position::TopLeft | Position::TopCenter | Position::TopRight
        )
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Tracing filter directive (e.g. "info", "bizdesk=debug").
    #[serde(default = "default_log_level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Toast notification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotificationsConfig {
    /// Lifetime of auto-closing toasts that do not set their own delay.
    #[serde(
        default = "default_auto_close_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub auto_close_delay_ms: Option<u32>,

    /// Exit animation delay of the toast widget.
    #[serde(
        default = "default_close_transition_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub close_transition_ms: Option<u32>,

    /// Where the toast stack is anchored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            auto_close_delay_ms: default_auto_close_delay_ms(),
            close_transition_ms: default_close_transition_ms(),
            position: Some(Position::default()),
        }
    }
}

impl NotificationsConfig {
    /// Returns the validated default auto-close delay.
    #[must_use]
    pub fn auto_close_delay(&self) -> AutoCloseDelay {
        self.auto_close_delay_ms
            .map(AutoCloseDelay::new)
            .unwrap_or_default()
    }

    /// Returns the validated exit transition.
    #[must_use]
    pub fn close_transition(&self) -> CloseTransition {
        self.close_transition_ms
            .map(CloseTransition::new)
            .unwrap_or_default()
    }

    /// Returns the configured anchor, or the default one.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position.unwrap_or_default()
    }
}

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl Config {
    /// Returns the configured log filter, or the default one.
    #[must_use]
    pub fn log_level(&self) -> &str {
        self.general
            .log_level
            .as_deref()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

fn default_log_level() -> Option<String> {
    Some(DEFAULT_LOG_LEVEL.to_string())
}

fn default_auto_close_delay_ms() -> Option<u32> {
    Some(DEFAULT_AUTO_CLOSE_DELAY_MS)
}

fn default_close_transition_ms() -> Option<u32> {
    Some(DEFAULT_CLOSE_TRANSITION_MS)
}

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => {
                    tracing::debug!(path = %path.display(), "settings loaded");
                    return (config, None);
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "settings unreadable, using defaults");
                    return (
                        Config::default(),
                        Some(format!("Settings could not be read: {}", err)),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}
