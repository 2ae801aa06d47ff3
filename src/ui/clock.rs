//! Wall-clock display for the header bar.

use chrono::{DateTime, Local, Timelike};

/// Renders the current wall-clock time. No external dependency; reads the
/// system clock on every draw.
#[derive(Debug, Default)]
pub struct ClockDisplay;

impl ClockDisplay {
    /// Current time, formatted for the header.
    pub fn text(&self) -> String {
        format_time(Local::now())
    }
}

/// `HH:MM:SS` formatting, split out so it can be tested against a fixed
/// instant.
pub fn format_time<Tz: chrono::TimeZone>(time: DateTime<Tz>) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time.hour(),
        time.minute(),
        time.second()
    )
}
