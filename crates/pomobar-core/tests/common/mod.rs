//! Recording fakes shared by the engine integration tests.
//!
//! The harness plays the host event loop: it owns the engine, forwards
//! settings notifications to `apply_config`, and delivers ticks by hand.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use pomobar_core::{
    Config, ControlLabel, DisplaySink, Event, Notifier, PomodoroEngine, SettingKey,
    SettingsStore, TickHandle, TickScheduler,
};

/// Everything the engine pushed out, in order.
#[derive(Debug, Default)]
pub struct Recording {
    pub time_texts: Vec<String>,
    pub control_labels: Vec<ControlLabel>,
    pub status_texts: Vec<String>,
    pub count_texts: Vec<String>,
    pub notifications: Vec<(String, String)>,
    pub scheduled: u32,
    pub cancelled: u32,
    pub live_handle: Option<u64>,
}

impl Recording {
    /// Total number of sink and notifier calls.
    pub fn output_calls(&self) -> usize {
        self.time_texts.len()
            + self.control_labels.len()
            + self.status_texts.len()
            + self.count_texts.len()
            + self.notifications.len()
    }

    pub fn last_time(&self) -> &str {
        self.time_texts.last().map(String::as_str).unwrap_or("")
    }

    pub fn last_status(&self) -> &str {
        self.status_texts.last().map(String::as_str).unwrap_or("")
    }

    pub fn last_count(&self) -> &str {
        self.count_texts.last().map(String::as_str).unwrap_or("")
    }

    pub fn last_label(&self) -> Option<ControlLabel> {
        self.control_labels.last().copied()
    }
}

pub struct RecordingSink(pub Rc<RefCell<Recording>>);

impl DisplaySink for RecordingSink {
    fn set_time_text(&mut self, text: &str) {
        self.0.borrow_mut().time_texts.push(text.to_string());
    }

    fn set_control_label(&mut self, label: ControlLabel) {
        self.0.borrow_mut().control_labels.push(label);
    }

    fn set_phase_status_text(&mut self, text: &str) {
        self.0.borrow_mut().status_texts.push(text.to_string());
    }

    fn set_session_count_text(&mut self, text: &str) {
        self.0.borrow_mut().count_texts.push(text.to_string());
    }
}

impl Notifier for RecordingSink {
    fn notify(&mut self, title: &str, body: &str) {
        self.0
            .borrow_mut()
            .notifications
            .push((title.to_string(), body.to_string()));
    }
}

/// Ticker that panics if a second tick source is armed.
pub struct SingleTicker {
    rec: Rc<RefCell<Recording>>,
    next_id: u64,
}

impl TickScheduler for SingleTicker {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        assert_eq!(period, Duration::from_secs(1));
        let mut rec = self.rec.borrow_mut();
        assert!(
            rec.live_handle.is_none(),
            "second tick source armed while {:?} is live",
            rec.live_handle
        );
        self.next_id += 1;
        rec.scheduled += 1;
        rec.live_handle = Some(self.next_id);
        TickHandle::new(self.next_id)
    }

    fn cancel(&mut self, handle: TickHandle) {
        let mut rec = self.rec.borrow_mut();
        assert_eq!(rec.live_handle, Some(handle.id()), "cancelled a stale handle");
        rec.cancelled += 1;
        rec.live_handle = None;
    }
}

pub struct Harness {
    pub engine: PomodoroEngine,
    pub settings: Rc<SettingsStore>,
    pub rec: Rc<RefCell<Recording>>,
    pending_changes: Rc<Cell<u32>>,
}

impl Harness {
    /// Engine over an in-memory store holding these minute/count values.
    pub fn with_minutes(work: i64, short_break: i64, long_break: i64, interval: i64) -> Self {
        let mut config = Config::default();
        config.set(SettingKey::WorkMinutes, work);
        config.set(SettingKey::ShortBreakMinutes, short_break);
        config.set(SettingKey::LongBreakMinutes, long_break);
        config.set(SettingKey::LongBreakInterval, interval);
        let settings = Rc::new(SettingsStore::in_memory(config));
        let rec = Rc::new(RefCell::new(Recording::default()));

        let mut engine = PomodoroEngine::new(
            settings.clone(),
            Box::new(RecordingSink(rec.clone())),
            Box::new(RecordingSink(rec.clone())),
            Box::new(SingleTicker {
                rec: rec.clone(),
                next_id: 0,
            }),
        );

        let pending_changes = Rc::new(Cell::new(0));
        let pending = pending_changes.clone();
        engine.watch_settings(Box::new(move || pending.set(pending.get() + 1)));

        Self {
            engine,
            settings,
            rec,
            pending_changes,
        }
    }

    pub fn classic() -> Self {
        Self::with_minutes(25, 5, 15, 4)
    }

    /// Edit a setting and let the "event loop" deliver the notification.
    pub fn set(&mut self, key: SettingKey, value: i64) -> Vec<Event> {
        self.settings
            .set_int(key, value)
            .expect("setting within bounds");
        self.deliver_changes()
    }

    pub fn pending_changes(&self) -> u32 {
        self.pending_changes.get()
    }

    pub fn deliver_changes(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while self.pending_changes.get() > 0 {
            self.pending_changes.set(self.pending_changes.get() - 1);
            events.extend(self.engine.apply_config());
        }
        events
    }

    /// Deliver `n` ticks, collecting whatever events they produce.
    pub fn tick_n(&mut self, n: u64) -> Vec<Event> {
        (0..n).filter_map(|_| self.engine.tick()).collect()
    }

    /// Start and tick until the current phase completes.
    pub fn run_phase(&mut self) -> Event {
        self.engine.start();
        let ticks = self.engine.remaining_seconds() + 1;
        let mut events = self.tick_n(ticks);
        assert_eq!(events.len(), 1, "expected exactly one completion");
        events.remove(0)
    }
}
