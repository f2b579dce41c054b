use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Label shown in the phase-status row.
    pub fn status_text(&self) -> &'static str {
        match self {
            Phase::Work => "Work Time",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Phase::Work)
    }

    /// Notification body announcing entry into this phase.
    pub fn announcement(&self) -> &'static str {
        if self.is_break() {
            "Take a break!"
        } else {
            "Time to work!"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_texts() {
        assert_eq!(Phase::Work.status_text(), "Work Time");
        assert_eq!(Phase::ShortBreak.status_text(), "Short Break");
        assert_eq!(Phase::LongBreak.status_text(), "Long Break");
    }

    #[test]
    fn announcements_follow_break_flag() {
        assert_eq!(Phase::Work.announcement(), "Time to work!");
        assert_eq!(Phase::ShortBreak.announcement(), "Take a break!");
        assert_eq!(Phase::LongBreak.announcement(), "Take a break!");
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&Phase::LongBreak).unwrap();
        assert_eq!(json, "\"long_break\"");
    }
}
