//! Recurring tick seam.
//!
//! A [`TickScheduler`] arms a repeating trigger and hands back a
//! [`TickHandle`]. The handle is the only way to cancel the trigger and it
//! cannot be cloned, so whoever holds it owns the live tick source.

use std::time::Duration;

/// Cadence the engine requests while running.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Ownership token for one scheduled recurring tick.
#[derive(Debug, PartialEq, Eq, Hash)]
#[must_use = "dropping a TickHandle leaks the scheduled tick; pass it to TickScheduler::cancel"]
pub struct TickHandle(u64);

impl TickHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Arms and disarms the host's periodic trigger.
///
/// The host must deliver at most one `tick()` per live handle per period and
/// never overlap deliveries.
pub trait TickScheduler {
    fn schedule(&mut self, period: Duration) -> TickHandle;

    fn cancel(&mut self, handle: TickHandle);
}
