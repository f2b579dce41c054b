//! Terminal implementations of the engine's collaborators.
//!
//! The status "bar" is a single line on stdout, reprinted whenever any part of
//! it changes. Notifications go to stdout and the log.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use pomobar_core::{ControlLabel, DisplaySink, Notifier, TickHandle, TickScheduler};
use tracing::{debug, info};

/// Renders the four display fields as one status line.
pub struct TerminalDisplay {
    time: String,
    label: ControlLabel,
    status: String,
    count: String,
    last_line: Option<String>,
}

impl TerminalDisplay {
    pub fn new() -> Self {
        Self {
            time: String::new(),
            label: ControlLabel::Start,
            status: String::new(),
            count: String::new(),
            last_line: None,
        }
    }

    fn render(&mut self) {
        // The engine paints fields one at a time; wait until all are known.
        if self.time.is_empty() || self.status.is_empty() || self.count.is_empty() {
            return;
        }
        let line = format!(
            "{} {}  [{}]  {}",
            self.status, self.time, self.label, self.count
        );
        if self.last_line.as_deref() != Some(line.as_str()) {
            println!("{line}");
            self.last_line = Some(line);
        }
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for TerminalDisplay {
    fn set_time_text(&mut self, text: &str) {
        self.time = text.to_string();
        self.render();
    }

    fn set_control_label(&mut self, label: ControlLabel) {
        self.label = label;
        self.render();
    }

    fn set_phase_status_text(&mut self, text: &str) {
        self.status = text.to_string();
        self.render();
    }

    fn set_session_count_text(&mut self, text: &str) {
        self.count = text.to_string();
        self.render();
    }
}

pub struct TerminalNotifier {
    enabled: bool,
}

impl TerminalNotifier {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        info!(title, body, "notification");
        if self.enabled {
            println!(">> {title}: {body}");
        }
    }
}

/// The tick the engine currently has armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTick {
    pub id: u64,
    pub period: Duration,
}

/// Shared cell the event loop reads to know whether to run an interval.
#[derive(Debug, Clone, Default)]
pub struct TickSlot(Rc<Cell<Option<ArmedTick>>>);

impl TickSlot {
    pub fn current(&self) -> Option<ArmedTick> {
        self.0.get()
    }

    /// Scheduler to hand to the engine. Periods are divided by `speed`.
    pub fn scheduler(&self, speed: u32) -> SlotScheduler {
        SlotScheduler {
            slot: self.clone(),
            speed: speed.max(1),
            next_id: 0,
        }
    }
}

pub struct SlotScheduler {
    slot: TickSlot,
    speed: u32,
    next_id: u64,
}

impl TickScheduler for SlotScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle {
        self.next_id += 1;
        let armed = ArmedTick {
            id: self.next_id,
            period: period / self.speed,
        };
        debug!(id = armed.id, period_ms = armed.period.as_millis() as u64, "tick armed");
        self.slot.0.set(Some(armed));
        TickHandle::new(armed.id)
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.slot.current().map(|t| t.id) == Some(handle.id()) {
            self.slot.0.set(None);
            debug!(id = handle.id(), "tick cancelled");
        }
    }
}
