//! Date and time utilities

use chrono::{Local, Timelike};

use crate::models::Daypart;

/// Current local hour (0-23)
pub fn current_hour() -> u32 {
    Local::now().hour()
}

/// Daypart for the current local time
pub fn current_daypart() -> Daypart {
    Daypart::from_hour(current_hour())
}

/// Format a track duration as "m:ss"
pub fn format_track_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Convert seconds to human-readable duration (e.g., "1 hr, 30 min")
pub fn seconds_to_human_readable(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{} sec", seconds);
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return format!("{} min", minutes);
    }

    let hours = minutes / 60;
    let remaining_minutes = minutes % 60;

    if remaining_minutes > 0 {
        format!("{} hr, {} min", hours, remaining_minutes)
    } else {
        format!("{} hr", hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_to_human_readable() {
        assert_eq!(seconds_to_human_readable(30), "30 sec");
        assert_eq!(seconds_to_human_readable(120), "2 min");
        assert_eq!(seconds_to_human_readable(3600), "1 hr");
        assert_eq!(seconds_to_human_readable(5400), "1 hr, 30 min");
    }

    #[test]
    fn test_format_track_duration() {
        assert_eq!(format_track_duration(242), "4:02");
        assert_eq!(format_track_duration(59), "0:59");
    }

    #[test]
    fn test_current_hour_in_range() {
        assert!(current_hour() < 24);
    }
}
