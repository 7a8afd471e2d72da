//! Time utilities: duration truncation and the `HH:MM:SS` / timestamp
//! formats shared by the log table and the CSV export.

use chrono::{DateTime, Duration, Local};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Difference `end - start` truncated to whole seconds, never negative.
pub fn seconds_between(start: &DateTime<Local>, end: &DateTime<Local>) -> Duration {
    let secs = end.signed_duration_since(*start).num_seconds();
    Duration::seconds(secs.max(0))
}

/// Format a duration as zero-padded total hours, minutes and seconds.
/// Hours keep counting past 24.
pub fn format_duration(d: Duration) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let s = total.abs();
    format!("{}{:02}:{:02}:{:02}", sign, s / 3600, (s % 3600) / 60, s % 60)
}

pub fn format_timestamp(t: &DateTime<Local>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}
