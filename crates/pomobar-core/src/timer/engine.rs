//! Pomodoro engine implementation.
//!
//! The engine is a tick-driven state machine. It does not use internal
//! threads or timers - it asks a [`TickScheduler`] for a recurring one-second
//! trigger and the host calls `tick()` each time that trigger fires.
//!
//! ## State Transitions
//!
//! ```text
//! (stopped, Work) -start-> (running, Work) -tick@0-> (stopped, ShortBreak | LongBreak)
//! (stopped, *Break) -start-> (running, *Break) -tick@0-> (stopped, Work)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = PomodoroEngine::new(settings, display, notifier, ticker);
//! engine.toggle();
//! // Every time the scheduled tick fires:
//! engine.tick(); // Returns Some(Event::PhaseCompleted) on the transition
//! ```

use std::rc::Rc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info};

use super::config::TimerConfig;
use super::format::{format_session_count, format_time};
use super::phase::Phase;
use super::ticker::{TickHandle, TickScheduler, TICK_PERIOD};
use crate::display::{ControlLabel, DisplaySink, Notifier};
use crate::events::Event;
use crate::settings::{ChangeCallback, SettingsProvider, SubscriptionId};

/// Title used for every phase-completion notification.
pub const NOTIFICATION_TITLE: &str = "Pomodoro Timer";

/// Observable timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub running: bool,
    pub completed_work_sessions: u32,
}

impl TimerState {
    fn initial(config: &TimerConfig) -> Self {
        Self {
            phase: Phase::Work,
            remaining_seconds: config.work_secs,
            running: false,
            completed_work_sessions: 0,
        }
    }
}

/// Core pomodoro engine.
///
/// Owns the timer state and the at-most-one live tick handle. All methods are
/// synchronous and assume the host never runs two of them at once.
pub struct PomodoroEngine {
    settings: Rc<dyn SettingsProvider>,
    display: Box<dyn DisplaySink>,
    notifier: Box<dyn Notifier>,
    ticker: Box<dyn TickScheduler>,
    state: TimerState,
    /// Last configuration read from `settings`; the baseline for reconciliation.
    config: TimerConfig,
    /// Present iff `state.running`.
    tick_handle: Option<TickHandle>,
    subscription: Option<SubscriptionId>,
    disposed: bool,
}

impl PomodoroEngine {
    /// Create an engine in the stopped Work phase and paint the initial display.
    pub fn new(
        settings: Rc<dyn SettingsProvider>,
        display: Box<dyn DisplaySink>,
        notifier: Box<dyn Notifier>,
        ticker: Box<dyn TickScheduler>,
    ) -> Self {
        let config = TimerConfig::from_settings(settings.as_ref());
        let mut engine = Self {
            settings,
            display,
            notifier,
            ticker,
            state: TimerState::initial(&config),
            config,
            tick_handle: None,
            subscription: None,
            disposed: false,
        };
        engine.refresh_display();
        engine
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.state.completed_work_sessions
    }

    /// Configuration the engine is currently counting with.
    pub fn config(&self) -> TimerConfig {
        self.config
    }

    pub fn has_tick_handle(&self) -> bool {
        self.tick_handle.is_some()
    }

    pub fn is_watching_settings(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn time_text(&self) -> String {
        format_time(self.state.remaining_seconds)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.state.phase,
            running: self.state.running,
            remaining_secs: self.state.remaining_seconds,
            completed_work_sessions: self.state.completed_work_sessions,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Subscribe `on_change` to the settings provider.
    ///
    /// The host decides how the notification reaches [`Self::apply_config`];
    /// the engine only owns the subscription so `dispose` can sever it.
    /// Calling this again replaces the previous subscription.
    pub fn watch_settings(&mut self, on_change: ChangeCallback) {
        if self.disposed {
            return;
        }
        if let Some(previous) = self.subscription.take() {
            self.settings.unsubscribe(previous);
        }
        self.subscription = Some(self.settings.subscribe(on_change));
    }

    pub fn start(&mut self) -> Option<Event> {
        if self.disposed || self.state.running {
            return None;
        }
        // Never let two tick sources coexist.
        self.release_tick();
        self.state.running = true;
        self.tick_handle = Some(self.ticker.schedule(TICK_PERIOD));
        self.display.set_control_label(ControlLabel::Pause);
        debug!(phase = ?self.state.phase, remaining = self.state.remaining_seconds, "timer started");
        Some(Event::TimerStarted {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    pub fn stop(&mut self) -> Option<Event> {
        if self.disposed || !self.state.running {
            return None;
        }
        self.state.running = false;
        self.release_tick();
        self.display.set_control_label(ControlLabel::Start);
        debug!(phase = ?self.state.phase, remaining = self.state.remaining_seconds, "timer stopped");
        Some(Event::TimerStopped {
            phase: self.state.phase,
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    pub fn toggle(&mut self) -> Option<Event> {
        if self.state.running {
            self.stop()
        } else {
            self.start()
        }
    }

    /// Stop and go back to a full Work countdown, whatever the current phase.
    ///
    /// The completed-session counter is kept.
    pub fn reset(&mut self) -> Option<Event> {
        if self.disposed {
            return None;
        }
        self.stop();
        self.config = TimerConfig::from_settings(self.settings.as_ref());
        self.state.phase = Phase::Work;
        self.state.remaining_seconds = self.config.work_secs;
        let time = self.time_text();
        self.display.set_time_text(&time);
        self.display
            .set_phase_status_text(self.state.phase.status_text());
        debug!(remaining = self.state.remaining_seconds, "timer reset");
        Some(Event::TimerReset {
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second.
    ///
    /// Late ticks (engine stopped or disposed) are ignored. The tick that finds
    /// the countdown already at zero performs the phase transition and returns
    /// `Some(Event::PhaseCompleted)`.
    pub fn tick(&mut self) -> Option<Event> {
        if self.disposed || !self.state.running {
            return None;
        }
        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            let time = self.time_text();
            self.display.set_time_text(&time);
            return None;
        }
        Some(self.complete_phase())
    }

    /// Re-read settings and reconcile the countdown with them.
    ///
    /// A running countdown is never touched; the new values only apply from the
    /// next phase. A stopped countdown adopts the new duration for its phase
    /// only if it still shows exactly the previous duration for that phase.
    pub fn apply_config(&mut self) -> Option<Event> {
        if self.disposed {
            return None;
        }
        let previous = self.config;
        self.config = TimerConfig::from_settings(self.settings.as_ref());

        let phase = self.state.phase;
        let mut resnapped = false;
        if !self.state.running && self.state.remaining_seconds == previous.duration_for(phase) {
            let fresh = self.config.duration_for(phase);
            if fresh != self.state.remaining_seconds {
                self.state.remaining_seconds = fresh;
                self.display.set_time_text(&format_time(fresh));
                resnapped = true;
                info!(phase = ?phase, remaining = fresh, "countdown resnapped to new duration");
            }
        }
        debug!(config = ?self.config, running = self.state.running, "configuration applied");
        Some(Event::ConfigApplied {
            phase,
            remaining_secs: self.state.remaining_seconds,
            resnapped,
            at: Utc::now(),
        })
    }

    /// Tear the engine down: cancel the tick, drop the settings subscription,
    /// and turn every later call into a no-op. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.state.running = false;
        self.release_tick();
        if let Some(id) = self.subscription.take() {
            self.settings.unsubscribe(id);
        }
        self.disposed = true;
        debug!("engine disposed");
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn release_tick(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.ticker.cancel(handle);
        }
    }

    fn complete_phase(&mut self) -> Event {
        self.state.running = false;
        self.release_tick();
        self.config = TimerConfig::from_settings(self.settings.as_ref());

        let from = self.state.phase;
        let to = match from {
            Phase::Work => {
                self.state.completed_work_sessions =
                    self.state.completed_work_sessions.saturating_add(1);
                self.config.break_after(self.state.completed_work_sessions)
            }
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.state.phase = to;
        self.state.remaining_seconds = self.config.duration_for(to);

        self.refresh_display();
        self.notifier.notify(NOTIFICATION_TITLE, to.announcement());
        info!(
            from = ?from,
            to = ?to,
            completed = self.state.completed_work_sessions,
            "phase completed"
        );

        Event::PhaseCompleted {
            from,
            to,
            completed_work_sessions: self.state.completed_work_sessions,
            remaining_secs: self.state.remaining_seconds,
            at: Utc::now(),
        }
    }

    fn refresh_display(&mut self) {
        let time = self.time_text();
        self.display.set_time_text(&time);
        self.display
            .set_phase_status_text(self.state.phase.status_text());
        self.display
            .set_session_count_text(&format_session_count(self.state.completed_work_sessions));
        self.display.set_control_label(if self.state.running {
            ControlLabel::Pause
        } else {
            ControlLabel::Start
        });
    }
}

impl Drop for PomodoroEngine {
    fn drop(&mut self) {
        self.dispose();
    }
}
