//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr; stdout carries the reports.

use std::io;

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for carecheck crates when `RUST_LOG` is unset.
    pub level: Level,
    /// Whether to use ANSI colors.
    pub with_ansi: bool,
}

impl LogConfig {
    /// Map `-v` occurrences to a level.
    ///
    /// - 0: warn
    /// - 1 (`-v`): info
    /// - 2+ (`-vv`): debug
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        };
        Self {
            level,
            with_ansi: true,
        }
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    // RUST_LOG wins over -v
    let level = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,carecheck={level},carecheck_cli={level}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(LogConfig::from_verbosity(0).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(1).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(5).level, Level::DEBUG);
    }
}
