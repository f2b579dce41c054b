//! # Pomobar Core Library
//!
//! This library provides the core logic for the Pomobar status-bar pomodoro
//! timer. The host (a panel applet, a tray icon, or the bundled terminal CLI)
//! owns the event loop and the widgets; this crate owns the countdown.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine. The host delivers one
//!   `tick()` per second while the engine holds a tick handle
//! - **Collaborators**: The engine reads a [`SettingsProvider`] and drives a
//!   [`DisplaySink`], a [`Notifier`] and a [`TickScheduler`]
//! - **Storage**: TOML-based settings store with bounds checking and change
//!   subscriptions
//!
//! ## Key Components
//!
//! - [`PomodoroEngine`]: Core timer state machine
//! - [`SettingsStore`]: Preferences persistence and change fan-out
//! - [`Event`]: Record of every state change, for logging and scripting

pub mod display;
pub mod error;
pub mod events;
pub mod settings;
pub mod storage;
pub mod timer;

pub use display::{ControlLabel, DisplaySink, Notifier};
pub use error::{ConfigError, CoreError, Result};
pub use events::Event;
pub use settings::{ChangeCallback, SettingKey, SettingsProvider, SubscriptionId};
pub use storage::{Config, SettingsStore};
pub use timer::{
    format_time, Phase, PomodoroEngine, TickHandle, TickScheduler, TimerConfig, TimerState,
};
