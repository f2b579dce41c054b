use std::fmt;

use serde::{Deserialize, Serialize};

/// Text on the start/pause control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlLabel {
    Start,
    Pause,
}

impl ControlLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlLabel::Start => "Start",
            ControlLabel::Pause => "Pause",
        }
    }
}

impl fmt::Display for ControlLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the engine renders. Hosts map each call onto a widget,
/// a status line, a tray tooltip, etc.
pub trait DisplaySink {
    /// Countdown text, `MM:SS`.
    fn set_time_text(&mut self, text: &str);

    fn set_control_label(&mut self, label: ControlLabel);

    /// "Work Time", "Short Break" or "Long Break".
    fn set_phase_status_text(&mut self, text: &str);

    /// e.g. "Pomodoros: 3".
    fn set_session_count_text(&mut self, text: &str);
}

/// Receives one announcement per completed phase.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}
