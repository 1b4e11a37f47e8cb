//! TOML-based engine configuration.
//!
//! Stores reminder and calendar preferences at
//! `~/.config/teamday/config.toml`. Every field has a default so a partial
//! file, or none at all, still yields a working configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::config_dir;
use crate::calendar::MeetingSpan;
use crate::error::ConfigError;

/// Reminder scheduling preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Minutes before an event's start at which its reminder fires.
    #[serde(default = "default_lead_time")]
    pub lead_time_minutes: u64,
    /// Upper bound on any single call into the notification store.
    #[serde(default = "default_op_timeout")]
    pub op_timeout_secs: u64,
    /// Application name shown on delivered notifications.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl ReminderConfig {
    pub fn lead_time(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.lead_time_minutes as i64)
    }

    pub fn op_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.op_timeout_secs)
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            lead_time_minutes: default_lead_time(),
            op_timeout_secs: default_op_timeout(),
            app_name: default_app_name(),
        }
    }
}

/// Calendar aggregation preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// How multi-day meetings mark the grid.
    #[serde(default)]
    pub meeting_span: MeetingSpan,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            meeting_span: MeetingSpan::default(),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reminders: ReminderConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = config_dir().map_err(|e| ConfigError::DirUnavailable(e.to_string()))?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the default file on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content, &path),
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning defaults on any error. Never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content, path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

fn default_true() -> bool {
    true
}

fn default_lead_time() -> u64 {
    10
}

fn default_op_timeout() -> u64 {
    5
}

fn default_app_name() -> String {
    "TeamDay".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.reminders.lead_time_minutes, 10);
        assert_eq!(parsed.reminders.op_timeout_secs, 5);
        assert!(parsed.reminders.enabled);
        assert_eq!(parsed.calendar.meeting_span, MeetingSpan::Boundaries);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [reminders]
            lead_time_minutes = 30
            "#,
        )
        .unwrap();
        assert_eq!(parsed.reminders.lead_time_minutes, 30);
        assert!(parsed.reminders.enabled);
        assert_eq!(parsed.reminders.app_name, "TeamDay");
        assert_eq!(parsed.calendar.meeting_span, MeetingSpan::Boundaries);
    }

    #[test]
    fn meeting_span_is_configurable() {
        let parsed: Config = toml::from_str(
            r#"
            [calendar]
            meeting_span = "every_day"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.calendar.meeting_span, MeetingSpan::EveryDay);
    }

    #[test]
    fn save_and_load_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.reminders.lead_time_minutes = 15;
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.reminders.lead_time_minutes, 15);
    }

    #[test]
    fn lead_time_converts_to_duration() {
        let cfg = ReminderConfig::default();
        assert_eq!(cfg.lead_time(), chrono::Duration::minutes(10));
        assert_eq!(cfg.op_timeout(), std::time::Duration::from_secs(5));
    }
}
