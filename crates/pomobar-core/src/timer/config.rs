use serde::Serialize;
use tracing::warn;

use super::phase::Phase;
use crate::settings::{SettingKey, SettingsProvider};

/// Durations and cadence the engine counts with, already converted to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerConfig {
    pub work_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
    /// Every Nth completed work session earns a long break.
    pub long_break_interval: u32,
}

impl TimerConfig {
    /// Build from minute/count values.
    ///
    /// Anything below 1 is clamped to 1; the provider is expected to enforce
    /// its own bounds, this only keeps the engine from misbehaving.
    pub fn from_minutes(work: i64, short_break: i64, long_break: i64, interval: i64) -> Self {
        Self {
            work_secs: minutes_to_secs(SettingKey::WorkMinutes, work),
            short_break_secs: minutes_to_secs(SettingKey::ShortBreakMinutes, short_break),
            long_break_secs: minutes_to_secs(SettingKey::LongBreakMinutes, long_break),
            long_break_interval: clamp_positive(SettingKey::LongBreakInterval, interval)
                .try_into()
                .unwrap_or(u32::MAX),
        }
    }

    /// Read all four values from `settings`.
    pub fn from_settings(settings: &dyn SettingsProvider) -> Self {
        Self::from_minutes(
            settings.get_int(SettingKey::WorkMinutes),
            settings.get_int(SettingKey::ShortBreakMinutes),
            settings.get_int(SettingKey::LongBreakMinutes),
            settings.get_int(SettingKey::LongBreakInterval),
        )
    }

    /// Reference duration for `phase`, in seconds.
    pub fn duration_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }

    /// Break earned after `completed` work sessions.
    pub fn break_after(&self, completed: u32) -> Phase {
        if completed % self.long_break_interval.max(1) == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::from_minutes(
            SettingKey::WorkMinutes.default_value(),
            SettingKey::ShortBreakMinutes.default_value(),
            SettingKey::LongBreakMinutes.default_value(),
            SettingKey::LongBreakInterval.default_value(),
        )
    }
}

fn clamp_positive(key: SettingKey, value: i64) -> u64 {
    if value < 1 {
        warn!(key = %key, value, "non-positive setting, clamping to 1");
        1
    } else {
        value as u64
    }
}

fn minutes_to_secs(key: SettingKey, minutes: i64) -> u64 {
    clamp_positive(key, minutes).saturating_mul(60)
}
