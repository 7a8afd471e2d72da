use crate::utils::time::{format_duration, format_timestamp, seconds_between};
use chrono::{DateTime, Duration, Local};

/// One completed work session. Built only when a running session stops and
/// never changed afterwards, so the fields are private.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    task: String,
    start_time: DateTime<Local>,
    stop_time: DateTime<Local>,
    duration: Duration,
}

impl TimeEntry {
    /// `stop_time` earlier than `start_time` is clamped to `start_time`.
    pub(crate) fn new(task: String, start_time: DateTime<Local>, stop_time: DateTime<Local>) -> Self {
        let stop_time = stop_time.max(start_time);
        Self {
            task,
            duration: seconds_between(&start_time, &stop_time),
            start_time,
            stop_time,
        }
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn start_time(&self) -> DateTime<Local> {
        self.start_time
    }

    pub fn stop_time(&self) -> DateTime<Local> {
        self.stop_time
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_str(&self) -> String {
        format_duration(self.duration)
    }

    pub fn started_str(&self) -> String {
        format_timestamp(&self.start_time)
    }

    pub fn stopped_str(&self) -> String {
        format_timestamp(&self.stop_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    #[test]
    fn duration_matches_timestamps() {
        let e = TimeEntry::new("Minutes".into(), at(9, 0, 0), at(9, 1, 30));
        assert_eq!(e.duration(), Duration::seconds(90));
        assert_eq!(e.duration_str(), "00:01:30");
        assert_eq!(e.started_str(), "2024-01-01 09:00:00");
        assert_eq!(e.stopped_str(), "2024-01-01 09:01:30");
    }

    #[test]
    fn stop_before_start_is_clamped() {
        let e = TimeEntry::new("Minutes".into(), at(9, 0, 0), at(8, 59, 0));
        assert_eq!(e.stop_time(), e.start_time());
        assert_eq!(e.duration(), Duration::zero());
    }
}
