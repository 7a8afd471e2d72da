//! Session state machine and the append-only log of completed entries.
//!
//! Two states only: `Idle -> start -> Running -> stop -> Idle`. Calling
//! `start` while running or `stop` while idle is an error and leaves the
//! tracker untouched.

use crate::core::clock::{Clock, SystemClock};
use crate::errors::{AppError, AppResult};
use crate::export::{self, AppendSink};
use crate::models::{TaskCatalog, TimeEntry};
use crate::utils::time::{format_duration, seconds_between};
use chrono::{DateTime, Duration, Local};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Running {
        task: String,
        start_time: DateTime<Local>,
    },
}

/// Result of changing the selected task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Nothing is running; the choice will be used by the next start.
    Selected,
    /// The running task was picked again.
    Unchanged,
    /// A different task was picked while another one is running. The
    /// caller decides whether to stop and restart.
    SwitchRequested { from: String, to: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggled {
    Started(String),
    Stopped(TimeEntry),
}

pub struct TimeTracker<C: Clock = SystemClock> {
    clock: C,
    catalog: TaskCatalog,
    selected: String,
    state: TrackerState,
    log: Vec<TimeEntry>,
}

impl TimeTracker<SystemClock> {
    pub fn new(catalog: TaskCatalog) -> Self {
        Self::with_clock(catalog, SystemClock)
    }
}

impl<C: Clock> TimeTracker<C> {
    pub fn with_clock(catalog: TaskCatalog, clock: C) -> Self {
        let selected = catalog.first().to_string();
        Self {
            clock,
            catalog,
            selected,
            state: TrackerState::Idle,
            log: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &TaskCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &TrackerState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, TrackerState::Running { .. })
    }

    /// Task of the running session, if any.
    pub fn current_task(&self) -> Option<&str> {
        match &self.state {
            TrackerState::Running { task, .. } => Some(task),
            TrackerState::Idle => None,
        }
    }

    pub fn started_at(&self) -> Option<DateTime<Local>> {
        match &self.state {
            TrackerState::Running { start_time, .. } => Some(*start_time),
            TrackerState::Idle => None,
        }
    }

    pub fn selected_task(&self) -> &str {
        &self.selected
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.log
    }

    /// Sum of all completed entries.
    pub fn total_tracked(&self) -> Duration {
        self.log
            .iter()
            .fold(Duration::zero(), |acc, e| acc + e.duration())
    }

    pub fn select_task(&mut self, name: &str) -> AppResult<Selection> {
        let name = self.catalog.get(name)?.to_string();

        let outcome = match self.current_task() {
            None => Selection::Selected,
            Some(current) if current == name => Selection::Unchanged,
            Some(current) => Selection::SwitchRequested {
                from: current.to_string(),
                to: name.clone(),
            },
        };

        debug!(task = %name, ?outcome, "task selected");
        self.selected = name;
        Ok(outcome)
    }

    pub fn start(&mut self, name: &str) -> AppResult<()> {
        if let Some(current) = self.current_task() {
            warn!(running = %current, requested = %name, "start while running");
            return Err(AppError::InvalidState(format!(
                "'{current}' is already running"
            )));
        }

        let task = self.catalog.get(name)?.to_string();
        let start_time = self.clock.now();

        info!(task = %task, %start_time, "session started");
        self.selected = task.clone();
        self.state = TrackerState::Running { task, start_time };
        Ok(())
    }

    pub fn stop(&mut self) -> AppResult<TimeEntry> {
        let TrackerState::Running { task, start_time } = &self.state else {
            warn!("stop while idle");
            return Err(AppError::InvalidState("no session is running".into()));
        };

        let entry = TimeEntry::new(task.clone(), *start_time, self.clock.now());
        info!(
            task = %entry.task(),
            duration = %entry.duration_str(),
            "session stopped"
        );

        self.log.push(entry.clone());
        self.state = TrackerState::Idle;
        Ok(entry)
    }

    /// The single start/stop action: stops a running session, otherwise
    /// starts the selected task.
    pub fn toggle(&mut self) -> AppResult<Toggled> {
        if self.is_running() {
            self.stop().map(Toggled::Stopped)
        } else {
            let task = self.selected.clone();
            self.start(&task)?;
            Ok(Toggled::Started(task))
        }
    }

    /// Time since the running session started, in whole seconds.
    pub fn elapsed(&self) -> AppResult<Duration> {
        self.started_at()
            .map(|start| seconds_between(&start, &self.clock.now()))
            .ok_or_else(|| AppError::InvalidState("no session is running".into()))
    }

    pub fn elapsed_str(&self) -> String {
        format_duration(self.elapsed().unwrap_or_else(|_| Duration::zero()))
    }

    /// Writes the whole log to `sink`; the header only goes out when the
    /// sink is empty. Returns the number of rows written.
    pub fn export_log<S: AppendSink + ?Sized>(&self, sink: &mut S) -> AppResult<usize> {
        let n = export::write_csv(sink, &self.log)?;
        info!(rows = n, "log exported");
        Ok(n)
    }

    pub fn export_log_to_path(&self, path: &Path) -> AppResult<usize> {
        let n = export::append_csv_file(path, &self.log)?;
        info!(rows = n, path = %path.display(), "log exported");
        Ok(n)
    }
}
