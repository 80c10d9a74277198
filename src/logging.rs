// SPDX-License-Identifier: MPL-2.0
//! Tracing subscriber setup for the binary.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the executable so embedders keep control of their own output.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Builds the filter: `RUST_LOG` wins, then `level`, then the default level.
pub fn filter(level: &str) -> EnvFilter {
    std::env::var("RUST_LOG")
        .ok()
        .and_then(|_| EnvFilter::try_from_default_env().ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(crate::config::DEFAULT_LOG_LEVEL))
}

/// Installs the global fmt subscriber.
///
/// Returns `false` if another subscriber was already installed.
pub fn init_tracing(level: &str) -> bool {
    tracing_subscriber::registry()
        .with(filter(level))
        .with(fmt::layer().with_target(true))
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn filter_uses_configured_level() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        assert_eq!(filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(
            filter("warn,bizdesk=trace").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn second_init_reports_existing_subscriber() {
        let _ = init_tracing("info");
        assert!(!init_tracing("debug"));
    }
}
