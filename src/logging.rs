//! Structured logging setup
//!
//! Thin wrapper over `tracing-subscriber`: an env-filter honoring
//! `RUST_LOG`, with the level otherwise driven by config or CLI verbosity.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

/// Log level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Map `-v` occurrences to a level, starting from `base`
    pub fn from_verbosity(base: LogLevel, verbose: u8) -> LogLevel {
        match (base, verbose) {
            (level, 0) => level,
            (_, 1) => LogLevel::Info,
            (_, 2) => LogLevel::Debug,
            (_, _) => LogLevel::Trace,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format (for development)
    Pretty,
    /// JSON format (for structured logging)
    Json,
    /// Compact format
    Compact,
}

/// Initialize the global tracing subscriber
pub fn init_logging(level: LogLevel, format: LogFormat) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("streakrs={}", level.as_filter())));

    let builder = fmt().with_env_filter(filter).with_target(false);
    let result = match format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(
            LogLevel::from_verbosity(LogLevel::Warn, 0),
            LogLevel::Warn
        );
        assert_eq!(
            LogLevel::from_verbosity(LogLevel::Warn, 1),
            LogLevel::Info
        );
        assert_eq!(
            LogLevel::from_verbosity(LogLevel::Warn, 2),
            LogLevel::Debug
        );
        assert_eq!(
            LogLevel::from_verbosity(LogLevel::Warn, 5),
            LogLevel::Trace
        );
    }

    #[test]
    fn test_level_serialization_is_lowercase() {
        let json = serde_json::to_string(&LogLevel::Debug).unwrap();
        assert_eq!(json, "\"debug\"");
    }
}
