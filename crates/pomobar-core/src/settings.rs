//! Settings provider seam.
//!
//! The engine reads its four integer settings through [`SettingsProvider`] and
//! listens for edits through a subscription. Hosts decide where the values
//! live; [`crate::storage::SettingsStore`] is the TOML-backed implementation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The integer settings the timer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SettingKey {
    WorkMinutes,
    ShortBreakMinutes,
    LongBreakMinutes,
    LongBreakInterval,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::WorkMinutes,
        SettingKey::ShortBreakMinutes,
        SettingKey::LongBreakMinutes,
        SettingKey::LongBreakInterval,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::WorkMinutes => "work-minutes",
            SettingKey::ShortBreakMinutes => "short-break-minutes",
            SettingKey::LongBreakMinutes => "long-break-minutes",
            SettingKey::LongBreakInterval => "long-break-interval",
        }
    }

    /// Inclusive range the preferences surface accepts for this key.
    pub fn bounds(&self) -> (i64, i64) {
        match self {
            SettingKey::WorkMinutes => (1, 180),
            SettingKey::ShortBreakMinutes => (1, 60),
            SettingKey::LongBreakMinutes => (1, 120),
            SettingKey::LongBreakInterval => (2, 50),
        }
    }

    pub fn default_value(&self) -> i64 {
        match self {
            SettingKey::WorkMinutes => 25,
            SettingKey::ShortBreakMinutes => 5,
            SettingKey::LongBreakMinutes => 15,
            SettingKey::LongBreakInterval => 4,
        }
    }

    /// Check `value` against [`Self::bounds`].
    pub fn validate(&self, value: i64) -> Result<i64, ConfigError> {
        let (min, max) = self.bounds();
        if (min..=max).contains(&value) {
            Ok(value)
        } else {
            Err(ConfigError::OutOfRange {
                key: self.as_str().to_string(),
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

/// Identifies one change subscription on a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Callback fired after any setting changes.
pub type ChangeCallback = Box<dyn Fn()>;

/// Read access to the timer settings plus change notification.
///
/// Implementations are single-threaded and take `&self`; anything mutable sits
/// behind interior mutability.
pub trait SettingsProvider {
    /// Current raw value: minutes for durations, a count for the interval.
    fn get_int(&self, key: SettingKey) -> i64;

    /// Register `on_change`; it fires after every committed edit.
    fn subscribe(&self, on_change: ChangeCallback) -> SubscriptionId;

    /// Drop a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}
