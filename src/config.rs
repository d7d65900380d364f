//! Application configuration
//!
//! TOML config under the platform config directory: the user's weekly
//! goals, an optional data-file override, and logging preferences. Loaded
//! once per session; the engine only ever sees the `UserGoals` inside it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::logging::{LogFormat, LogLevel};
use crate::models::UserGoals;

const CONFIG_VERSION: &str = "1.0";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Weekly goal targets
    pub goals: UserGoals,

    /// Data file override; platform default when unset
    pub data_file: Option<PathBuf>,

    /// Logging preferences
    pub logging: LogSettings,
}

/// Configuration metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Logging preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            level: LogLevel::Warn,
            format: LogFormat::Pretty,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();
        AppConfig {
            metadata: ConfigMetadata {
                version: CONFIG_VERSION.to_string(),
                created_at: now,
                updated_at: now,
            },
            goals: UserGoals::default(),
            data_file: None,
            logging: LogSettings::default(),
        }
    }
}

impl AppConfig {
    /// Default config location under the platform config directory
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("platform config directory unavailable")?;
        Ok(base.join("streakrs").join("config.toml"))
    }

    /// Load from `path`, or defaults if the file does not exist
    pub fn load(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(AppConfig::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config at {}", path.display()))
    }

    /// Save to `path`, stamping `updated_at`
    pub fn save(&mut self, path: &PathBuf) -> Result<()> {
        self.metadata.updated_at = Utc::now();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        fs::write(path, raw).with_context(|| format!("writing config to {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.metadata.version, CONFIG_VERSION);
        assert_eq!(config.goals, UserGoals::default());
        assert!(config.data_file.is_none());
    }

    #[test]
    fn test_load_missing_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.goals, UserGoals::default());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("streakrs").join("config.toml");

        let mut config = AppConfig::default();
        config.goals.strength_sessions = 5;
        config.save(&path).unwrap();

        let loaded = AppConfig::load(&path).unwrap();
        assert_eq!(loaded.goals.strength_sessions, 5);
        assert_eq!(loaded.metadata.version, CONFIG_VERSION);
    }

    #[test]
    fn test_save_bumps_updated_at() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        let created = config.metadata.updated_at;
        config.save(&path).unwrap();
        assert!(config.metadata.updated_at >= created);
    }
}
