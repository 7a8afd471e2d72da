// src/export/model.rs

use crate::models::TimeEntry;
use serde::Serialize;

/// Column names, in export order.
pub const HEADERS: [&str; 4] = ["Task", "Duration", "Start Time", "Stop Time"];

/// Flat, already formatted row of the CSV export.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryExport {
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Duration")]
    pub duration: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "Stop Time")]
    pub stop_time: String,
}

impl From<&TimeEntry> for EntryExport {
    fn from(e: &TimeEntry) -> Self {
        Self {
            task: e.task().to_string(),
            duration: e.duration_str(),
            start_time: e.started_str(),
            stop_time: e.stopped_str(),
        }
    }
}

/// Same row as plain strings, for the log table.
pub(crate) fn entry_to_row(e: &TimeEntry) -> Vec<String> {
    let row = EntryExport::from(e);
    vec![row.task, row.duration, row.start_time, row.stop_time]
}
