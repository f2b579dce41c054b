use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change the engine makes produces an Event.
/// Hosts log or print them; nothing in the engine depends on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    PhaseCompleted {
        from: Phase,
        to: Phase,
        completed_work_sessions: u32,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// Settings were re-read. `resnapped` is true when the stopped countdown
    /// adopted the new duration.
    ConfigApplied {
        phase: Phase,
        remaining_secs: u64,
        resnapped: bool,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        running: bool,
        remaining_secs: u64,
        completed_work_sessions: u32,
        at: DateTime<Utc>,
    },
}
