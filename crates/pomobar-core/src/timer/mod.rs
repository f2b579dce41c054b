mod config;
mod engine;
mod format;
mod phase;
mod ticker;

pub use config::TimerConfig;
pub use engine::{PomodoroEngine, TimerState, NOTIFICATION_TITLE};
pub use format::{format_session_count, format_time};
pub use phase::Phase;
pub use ticker::{TickHandle, TickScheduler, TICK_PERIOD};
