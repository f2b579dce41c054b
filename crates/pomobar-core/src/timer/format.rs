/// Render seconds as `MM:SS`.
///
/// Both fields are padded to two digits. Minutes are never rolled over into
/// hours, so durations past 99 minutes simply grow a third digit.
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Text for the session counter row.
pub fn format_session_count(completed: u32) -> String {
    format!("Pomodoros: {completed}")
}
