//! TOML-based application configuration.
//!
//! Stores the timer durations and the notification toggle:
//!
//! ```toml
//! [timer]
//! work-minutes = 25
//! short-break-minutes = 5
//! long-break-minutes = 15
//! long-break-interval = 4
//!
//! [notifications]
//! enabled = true
//! ```
//!
//! Configuration is stored at `~/.config/pomobar/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::settings::SettingKey;

/// Timer durations in minutes plus the long-break cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TimerSettings {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: i64,
    #[serde(default = "default_short_break_minutes")]
    pub short_break_minutes: i64,
    #[serde(default = "default_long_break_minutes")]
    pub long_break_minutes: i64,
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: i64,
}

/// Notification configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomobar/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerSettings,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

fn default_work_minutes() -> i64 {
    SettingKey::WorkMinutes.default_value()
}
fn default_short_break_minutes() -> i64 {
    SettingKey::ShortBreakMinutes.default_value()
}
fn default_long_break_minutes() -> i64 {
    SettingKey::LongBreakMinutes.default_value()
}
fn default_long_break_interval() -> i64 {
    SettingKey::LongBreakInterval.default_value()
}
fn default_true() -> bool {
    true
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            short_break_minutes: default_short_break_minutes(),
            long_break_minutes: default_long_break_minutes(),
            long_break_interval: default_long_break_interval(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Config {
    pub fn get(&self, key: SettingKey) -> i64 {
        match key {
            SettingKey::WorkMinutes => self.timer.work_minutes,
            SettingKey::ShortBreakMinutes => self.timer.short_break_minutes,
            SettingKey::LongBreakMinutes => self.timer.long_break_minutes,
            SettingKey::LongBreakInterval => self.timer.long_break_interval,
        }
    }

    /// Overwrite one value without bounds checks.
    pub fn set(&mut self, key: SettingKey, value: i64) {
        let slot = match key {
            SettingKey::WorkMinutes => &mut self.timer.work_minutes,
            SettingKey::ShortBreakMinutes => &mut self.timer.short_break_minutes,
            SettingKey::LongBreakMinutes => &mut self.timer.long_break_minutes,
            SettingKey::LongBreakInterval => &mut self.timer.long_break_interval,
        };
        *slot = value;
    }

    /// Check every timer value against its bounds.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for key in SettingKey::ALL {
            key.validate(self.get(key))?;
        }
        Ok(())
    }

    /// Read and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds a value outside its bounds.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn keys_are_kebab_case_on_disk() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("work-minutes = 25"));
        assert!(toml_str.contains("long-break-interval = 4"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("[timer]\nwork-minutes = 50\n").unwrap();
        assert_eq!(parsed.timer.work_minutes, 50);
        assert_eq!(parsed.timer.short_break_minutes, 5);
        assert_eq!(parsed.timer.long_break_minutes, 15);
        assert!(parsed.notifications.enabled);
    }

    #[test]
    fn get_and_set_by_key() {
        let mut cfg = Config::default();
        cfg.set(SettingKey::LongBreakMinutes, 30);
        assert_eq!(cfg.get(SettingKey::LongBreakMinutes), 30);
        assert_eq!(cfg.timer.long_break_minutes, 30);
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let mut cfg = Config::default();
        cfg.set(SettingKey::ShortBreakMinutes, 61);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::OutOfRange { max: 60, .. })
        ));
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timer]\nlong-break-interval = 1\n").unwrap();
        assert!(Config::load_from(&path).is_err());

        std::fs::write(&path, "not = [valid").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseFailed(_))
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.set(SettingKey::WorkMinutes, 45);
        cfg.notifications.enabled = false;
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }
}
