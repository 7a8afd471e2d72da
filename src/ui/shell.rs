//! Interactive, line-oriented front end over a [`TimeTracker`].
//!
//! One input line is one user action. The shell owns the tracker for the
//! whole session; every failure is printed and the loop keeps going.

use crate::core::{Clock, Selection, TimeTracker, Toggled};
use crate::errors::{AppError, AppResult};
use crate::export::entry_to_row;
use crate::models::TimeEntry;
use crate::ui::messages::{error, header, info, set_styled, success, warning};
use crate::utils::table::Table;
use crate::utils::time::format_duration;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration as StdDuration;
use tracing::debug;

pub const LOG_HEADERS: [&str; 4] = ["Task", "Duration", "Started", "Stopped"];

const HELP: &str = "\
Commands:
  tasks                 list task categories
  select <name|number>  choose a task (asks before switching a running one)
  start [name|number]   start timing the selected (or given) task
  stop                  stop timing and record the session
  toggle, t             start or stop
  status, elapsed       show the running task and elapsed time
  watch [n]             show the elapsed time once per second, n times
  log                   show recorded sessions
  export [file]         append recorded sessions to the CSV file
  help                  this text
  quit, exit            stop any running session and leave";

#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub export_path: PathBuf,
    pub confirm_switch: bool,
    pub autosave: bool,
    pub styled: bool,
    pub tick: StdDuration,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            export_path: PathBuf::from("time_log.csv"),
            confirm_switch: true,
            autosave: false,
            styled: true,
            tick: StdDuration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Tasks,
    Select(String),
    Start(Option<String>),
    Stop,
    Toggle,
    Status,
    Watch(u32),
    Log,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> AppResult<Self> {
        let line = line.trim();
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then(|| rest.to_string());

        let cmd = match keyword.to_lowercase().as_str() {
            "tasks" | "ls" => Command::Tasks,
            "select" | "sel" => Command::Select(arg.ok_or_else(|| {
                AppError::InvalidCommand("select needs a task name or number".into())
            })?),
            "start" => Command::Start(arg),
            "stop" => Command::Stop,
            "toggle" | "t" => Command::Toggle,
            "status" | "elapsed" | "s" => Command::Status,
            "watch" => match arg {
                None => Command::Watch(10),
                Some(n) => Command::Watch(n.parse().map_err(|_| {
                    AppError::InvalidCommand(format!("watch expects a number of ticks, got '{n}'"))
                })?),
            },
            "log" => Command::Log,
            "export" => Command::Export(arg.map(PathBuf::from)),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(AppError::InvalidCommand(format!(
                    "unknown command '{other}' (try 'help')"
                )));
            }
        };
        Ok(cmd)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell<C: Clock, R: BufRead, W: Write> {
    tracker: TimeTracker<C>,
    opts: ShellOptions,
    input: R,
    out: W,
}

impl<C: Clock, R: BufRead, W: Write> Shell<C, R, W> {
    pub fn new(tracker: TimeTracker<C>, opts: ShellOptions, input: R, out: W) -> Self {
        set_styled(opts.styled);
        Self {
            tracker,
            opts,
            input,
            out,
        }
    }

    pub fn tracker(&self) -> &TimeTracker<C> {
        &self.tracker
    }

    pub fn into_parts(self) -> (TimeTracker<C>, W) {
        (self.tracker, self.out)
    }

    /// Read and handle lines until `quit` or end of input.
    pub fn run(&mut self) -> AppResult<()> {
        header(&mut self.out, "Timekeeper")?;
        info(&mut self.out, "Type 'help' for the list of commands.")?;

        loop {
            self.prompt()?;
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    writeln!(self.out)?;
                    self.handle_line("quit")?;
                    return Ok(());
                }
                Err(e) => {
                    // input is gone; record what is running before bailing out
                    error(&mut self.out, &e)?;
                    self.handle_line("quit")?;
                    return Err(e);
                }
            };

            if self.handle_line(&line)? == Flow::Quit {
                return Ok(());
            }
        }
    }

    /// Parse and execute one line. Command failures are reported on the
    /// output; only a failure to write that report is returned.
    pub fn handle_line(&mut self, line: &str) -> AppResult<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let result = line.parse::<Command>().and_then(|cmd| {
            debug!(?cmd, "shell command");
            self.execute(cmd)
        });

        match result {
            Ok(flow) => Ok(flow),
            Err(e) if e.is_user_error() => {
                warning(&mut self.out, &e)?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                error(&mut self.out, &e)?;
                Ok(Flow::Continue)
            }
        }
    }

    pub fn execute(&mut self, cmd: Command) -> AppResult<Flow> {
        match cmd {
            Command::Tasks => self.list_tasks()?,
            Command::Select(input) => self.select(&input)?,
            Command::Start(input) => self.start(input.as_deref())?,
            Command::Stop => {
                let entry = self.tracker.stop()?;
                self.report_stopped(&entry)?;
            }
            Command::Toggle => match self.tracker.toggle()? {
                Toggled::Started(task) => self.report_started(&task)?,
                Toggled::Stopped(entry) => self.report_stopped(&entry)?,
            },
            Command::Status => self.status()?,
            Command::Watch(ticks) => self.watch(ticks)?,
            Command::Log => self.show_log()?,
            Command::Export(path) => self.export(path)?,
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Quit => {
                self.finish()?;
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn prompt(&mut self) -> AppResult<()> {
        match self.tracker.current_task() {
            Some(task) => write!(self.out, "[{task} {}] > ", self.tracker.elapsed_str())?,
            None => write!(self.out, "[idle: {}] > ", self.tracker.selected_task())?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Invalid UTF-8 is replaced rather than treated as a read failure.
    fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask(&mut self, question: &str) -> AppResult<bool> {
        write!(self.out, "{question} [y/N]: ")?;
        self.out.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        let answer = answer.trim().to_ascii_lowercase();
        Ok(answer == "y" || answer == "yes")
    }

    fn list_tasks(&mut self) -> AppResult<()> {
        let running = self.tracker.current_task().map(str::to_string);
        let selected = self.tracker.selected_task().to_string();

        for (i, name) in self.tracker.catalog().names().iter().enumerate() {
            let marker = if running.as_deref() == Some(name) {
                "▶"
            } else if *name == selected {
                "*"
            } else {
                " "
            };
            writeln!(self.out, "{marker} {:>2}. {name}", i + 1)?;
        }
        Ok(())
    }

    fn select(&mut self, input: &str) -> AppResult<()> {
        let name = self.tracker.catalog().resolve(input)?.to_string();

        match self.tracker.select_task(&name)? {
            Selection::Selected => info(&mut self.out, format!("Selected {name}"))?,
            Selection::Unchanged => info(&mut self.out, format!("Already working on {name}"))?,
            Selection::SwitchRequested { from, to } => {
                let go = !self.opts.confirm_switch
                    || self.ask(&format!("Stop working on {from} and start working on {to}?"))?;

                if go {
                    self.switch(&to)?;
                } else {
                    self.tracker.select_task(&from)?;
                    info(&mut self.out, format!("Still working on {from}"))?;
                }
            }
        }
        Ok(())
    }

    fn switch(&mut self, to: &str) -> AppResult<()> {
        let entry = self.tracker.stop()?;
        self.report_stopped(&entry)?;
        self.tracker.start(to)?;
        self.report_started(to)
    }

    fn start(&mut self, input: Option<&str>) -> AppResult<()> {
        let task = match input {
            Some(input) => self.tracker.catalog().resolve(input)?.to_string(),
            None => self.tracker.selected_task().to_string(),
        };
        self.tracker.start(&task)?;
        self.report_started(&task)
    }

    fn report_started(&mut self, task: &str) -> AppResult<()> {
        let at = self
            .tracker
            .started_at()
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_default();
        success(&mut self.out, format!("Started {task} at {at}"))?;
        Ok(())
    }

    fn report_stopped(&mut self, entry: &TimeEntry) -> AppResult<()> {
        success(
            &mut self.out,
            format!(
                "Stopped {} after {} ({} -> {})",
                entry.task(),
                entry.duration_str(),
                entry.started_str(),
                entry.stopped_str()
            ),
        )?;
        Ok(())
    }

    fn status(&mut self) -> AppResult<()> {
        match self.tracker.current_task() {
            Some(task) => {
                let line = format!("Working on {task} for {}", self.tracker.elapsed_str());
                info(&mut self.out, line)?;
            }
            None => {
                let line = format!("Idle 00:00:00 (selected: {})", self.tracker.selected_task());
                info(&mut self.out, line)?;
            }
        }
        Ok(())
    }

    fn watch(&mut self, ticks: u32) -> AppResult<()> {
        let task = self
            .tracker
            .current_task()
            .map(str::to_string)
            .ok_or_else(|| AppError::InvalidState("no session is running".into()))?;

        for i in 0..ticks {
            writeln!(self.out, "{task} {}", self.tracker.elapsed_str())?;
            self.out.flush()?;
            if i + 1 < ticks {
                std::thread::sleep(self.opts.tick);
            }
        }
        Ok(())
    }

    fn show_log(&mut self) -> AppResult<()> {
        if self.tracker.entries().is_empty() {
            info(&mut self.out, "No sessions recorded yet.")?;
            return Ok(());
        }

        let mut table = Table::new(LOG_HEADERS);
        for e in self.tracker.entries() {
            table.add_row(entry_to_row(e));
        }
        write!(self.out, "{}", table.render(self.opts.styled))?;
        writeln!(
            self.out,
            "Total: {}",
            format_duration(self.tracker.total_tracked())
        )?;
        Ok(())
    }

    fn export(&mut self, path: Option<PathBuf>) -> AppResult<()> {
        let path = path.unwrap_or_else(|| self.opts.export_path.clone());
        let n = self.tracker.export_log_to_path(&path)?;
        success(
            &mut self.out,
            format!("Saved {n} session(s) to {}", path.display()),
        )?;
        Ok(())
    }

    /// Leaving records a running session; with autosave the log is then
    /// appended to the export file. A failed autosave is reported but does
    /// not keep the shell open.
    fn finish(&mut self) -> AppResult<()> {
        if self.tracker.is_running() {
            warning(&mut self.out, "A session is still running, stopping it.")?;
            let entry = self.tracker.stop()?;
            self.report_stopped(&entry)?;
        }

        if self.opts.autosave
            && !self.tracker.entries().is_empty()
            && let Err(e) = self.export(None)
        {
            error(&mut self.out, format!("Autosave failed: {e}"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::models::TaskCatalog;
    use chrono::{DateTime, Duration, Local, TimeZone};
    use std::io::Cursor;

    fn jan1(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 1, 1, h, m, s).unwrap()
    }

    fn opts(confirm: bool) -> ShellOptions {
        ShellOptions {
            export_path: std::env::temp_dir().join("timekeeper_shell_default.csv"),
            confirm_switch: confirm,
            autosave: false,
            styled: false,
            tick: StdDuration::ZERO,
        }
    }

    type TestShell = Shell<ManualClock, Cursor<Vec<u8>>, Vec<u8>>;

    fn shell(input: &str, confirm: bool) -> (TestShell, ManualClock) {
        let clock = ManualClock::new(jan1(9, 0, 0));
        let tracker = TimeTracker::with_clock(TaskCatalog::default(), clock.clone());
        let sh = Shell::new(
            tracker,
            opts(confirm),
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
        );
        (sh, clock)
    }

    fn output(sh: TestShell) -> String {
        String::from_utf8(sh.into_parts().1).unwrap()
    }

    #[test]
    fn parses_commands() {
        assert_eq!("tasks".parse::<Command>().unwrap(), Command::Tasks);
        assert_eq!(
            "select  Web Admin ".parse::<Command>().unwrap(),
            Command::Select("Web Admin".into())
        );
        assert_eq!("START".parse::<Command>().unwrap(), Command::Start(None));
        assert_eq!(
            "start 3".parse::<Command>().unwrap(),
            Command::Start(Some("3".into()))
        );
        assert_eq!("t".parse::<Command>().unwrap(), Command::Toggle);
        assert_eq!("watch".parse::<Command>().unwrap(), Command::Watch(10));
        assert_eq!("watch 3".parse::<Command>().unwrap(), Command::Watch(3));
        assert_eq!(
            "export /tmp/x.csv".parse::<Command>().unwrap(),
            Command::Export(Some(PathBuf::from("/tmp/x.csv")))
        );
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn rejects_bad_commands() {
        assert!(matches!("select".parse::<Command>(), Err(AppError::InvalidCommand(_))));
        assert!(matches!("watch x".parse::<Command>(), Err(AppError::InvalidCommand(_))));
        assert!(matches!("dance".parse::<Command>(), Err(AppError::InvalidCommand(_))));
    }

    #[test]
    fn errors_are_reported_and_loop_continues() {
        let (mut sh, _) = shell("", true);
        assert_eq!(sh.handle_line("stop").unwrap(), Flow::Continue);
        assert_eq!(sh.handle_line("select Coffee").unwrap(), Flow::Continue);
        assert_eq!(sh.handle_line("dance").unwrap(), Flow::Continue);

        let out = output(sh);
        assert!(out.contains("Invalid state: no session is running"));
        assert!(out.contains("Unknown task: Coffee"));
        assert!(out.contains("unknown command 'dance'"));
    }

    #[test]
    fn start_stop_records_session() {
        let (mut sh, clock) = shell("", true);
        sh.handle_line("start Minutes").unwrap();
        clock.set(jan1(9, 1, 30));
        sh.handle_line("status").unwrap();
        sh.handle_line("stop").unwrap();

        assert_eq!(sh.tracker().entries().len(), 1);
        let out = output(sh);
        assert!(out.contains("Started Minutes at 09:00:00"));
        assert!(out.contains("Working on Minutes for 00:01:30"));
        assert!(out.contains("Stopped Minutes after 00:01:30"));
    }

    #[test]
    fn start_while_running_is_refused() {
        let (mut sh, _) = shell("", true);
        sh.handle_line("start 3").unwrap();
        sh.handle_line("start 5").unwrap();
        assert_eq!(sh.tracker().current_task(), Some("Minutes"));
        assert!(output(sh).contains("'Minutes' is already running"));
    }

    #[test]
    fn confirmed_switch_stops_and_restarts() {
        let (mut sh, clock) = shell("y\n", true);
        sh.handle_line("start Minutes").unwrap();
        clock.advance(Duration::minutes(10));
        sh.handle_line("select Web Admin").unwrap();

        let t = sh.tracker();
        assert_eq!(t.entries().len(), 1);
        assert_eq!(t.entries()[0].task(), "Minutes");
        assert_eq!(t.entries()[0].duration_str(), "00:10:00");
        assert_eq!(t.current_task(), Some("Web Admin"));
        assert_eq!(t.started_at(), Some(jan1(9, 10, 0)));

        let out = output(sh);
        assert!(out.contains("Stop working on Minutes and start working on Web Admin? [y/N]"));
    }

    #[test]
    fn declined_switch_reverts_selection() {
        let (mut sh, clock) = shell("n\n", true);
        sh.handle_line("start Minutes").unwrap();
        clock.advance(Duration::minutes(1));
        sh.handle_line("select 5").unwrap();

        let t = sh.tracker();
        assert!(t.entries().is_empty());
        assert_eq!(t.current_task(), Some("Minutes"));
        assert_eq!(t.selected_task(), "Minutes");
        assert!(output(sh).contains("Still working on Minutes"));
    }

    #[test]
    fn switch_without_confirmation() {
        let (mut sh, _) = shell("", false);
        sh.handle_line("start Minutes").unwrap();
        sh.handle_line("select File Scanning").unwrap();
        assert_eq!(sh.tracker().entries().len(), 1);
        assert_eq!(sh.tracker().current_task(), Some("File Scanning"));
    }

    #[test]
    fn toggle_uses_selected_task() {
        let (mut sh, clock) = shell("", true);
        sh.handle_line("select 2").unwrap();
        sh.handle_line("t").unwrap();
        clock.advance(Duration::seconds(42));
        sh.handle_line("t").unwrap();

        let e = &sh.tracker().entries()[0];
        assert_eq!(e.task(), "Records Management");
        assert_eq!(e.duration_str(), "00:00:42");
    }

    #[test]
    fn log_renders_table_and_total() {
        let (mut sh, clock) = shell("", true);
        sh.handle_line("log").unwrap();
        sh.handle_line("start Minutes").unwrap();
        clock.set(jan1(9, 1, 30));
        sh.handle_line("stop").unwrap();
        sh.handle_line("log").unwrap();

        let out = output(sh);
        assert!(out.contains("No sessions recorded yet."));
        assert!(out.contains("Task    | Duration | Started             | Stopped"));
        assert!(out.contains("Minutes | 00:01:30 | 2024-01-01 09:00:00 | 2024-01-01 09:01:30"));
        assert!(out.contains("Total: 00:01:30"));
    }

    #[test]
    fn tasks_marks_running_and_selected() {
        let (mut sh, _) = shell("", true);
        sh.handle_line("tasks").unwrap();
        sh.handle_line("start 3").unwrap();
        sh.handle_line("tasks").unwrap();

        let out = output(sh);
        assert!(out.contains("*  1. Donation Entry & Letters"));
        assert!(out.contains("▶  3. Minutes"));
    }

    #[test]
    fn watch_requires_running_session() {
        let (mut sh, _) = shell("", true);
        sh.handle_line("watch 2").unwrap();
        sh.handle_line("start 3").unwrap();
        sh.handle_line("watch 2").unwrap();

        let out = output(sh);
        assert!(out.contains("no session is running"));
        assert_eq!(out.matches("Minutes 00:00:00").count(), 2);
    }

    #[test]
    fn export_failure_is_reported() {
        let (mut sh, _) = shell("", true);
        let bad = std::env::temp_dir()
            .join("timekeeper_missing_dir")
            .join("x")
            .join("log.csv");
        let flow = sh.handle_line(&format!("export {}", bad.display())).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert!(output(sh).contains("I/O error"));
    }

    #[test]
    fn quit_stops_running_session_and_autosaves() {
        let path = std::env::temp_dir().join("timekeeper_shell_autosave.csv");
        std::fs::remove_file(&path).ok();

        let clock = ManualClock::new(jan1(9, 0, 0));
        let tracker = TimeTracker::with_clock(TaskCatalog::default(), clock.clone());
        let mut sh = Shell::new(
            tracker,
            ShellOptions {
                export_path: path.clone(),
                autosave: true,
                ..opts(true)
            },
            Cursor::new(Vec::new()),
            Vec::new(),
        );

        sh.handle_line("start Minutes").unwrap();
        clock.set(jan1(9, 1, 30));
        assert_eq!(sh.handle_line("quit").unwrap(), Flow::Quit);
        assert_eq!(sh.tracker().entries().len(), 1);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Task,Duration,Start Time,Stop Time\n\
             Minutes,00:01:30,2024-01-01 09:00:00,2024-01-01 09:01:30\n"
        );
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn run_handles_end_of_input() {
        let (mut sh, _) = shell("start 1\nstop\n", true);
        sh.run().unwrap();
        assert_eq!(sh.tracker().entries().len(), 1);
        assert!(!sh.tracker().is_running());
    }

    fn autosave_shell(input: &[u8], export_path: PathBuf) -> (TestShell, ManualClock) {
        let clock = ManualClock::new(jan1(9, 0, 0));
        let tracker = TimeTracker::with_clock(TaskCatalog::default(), clock.clone());
        let sh = Shell::new(
            tracker,
            ShellOptions {
                export_path,
                autosave: true,
                ..opts(true)
            },
            Cursor::new(input.to_vec()),
            Vec::new(),
        );
        (sh, clock)
    }

    #[test]
    fn invalid_utf8_line_is_reported_and_session_continues() {
        let path = std::env::temp_dir().join("timekeeper_shell_bad_utf8.csv");
        std::fs::remove_file(&path).ok();

        let (mut sh, _) = autosave_shell(b"start 3\n\xff\xfe\nstop\n", path.clone());
        sh.run().unwrap();

        assert!(!sh.tracker().is_running());
        assert_eq!(sh.tracker().entries().len(), 1);
        assert_eq!(sh.tracker().entries()[0].task(), "Minutes");

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(output(sh).contains("unknown command"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn quit_leaves_even_when_autosave_fails() {
        let bad = std::env::temp_dir()
            .join("timekeeper_autosave_missing_dir")
            .join("nested")
            .join("log.csv");
        let (mut sh, _) = autosave_shell(b"", bad);

        sh.handle_line("start 1").unwrap();
        assert_eq!(sh.handle_line("quit").unwrap(), Flow::Quit);
        assert!(!sh.tracker().is_running());
        assert_eq!(sh.tracker().entries().len(), 1);

        let out = output(sh);
        assert!(out.contains("Autosave failed: I/O error"));
    }

    #[test]
    fn unstyled_output_has_no_escape_codes() {
        let (mut sh, _) = shell("", true);
        sh.handle_line("start 1").unwrap();
        sh.handle_line("stop").unwrap();
        sh.handle_line("dance").unwrap();
        sh.handle_line("log").unwrap();

        let out = output(sh);
        assert!(out.contains("Stopped Donation Entry & Letters"));
        assert!(!out.contains('\x1b'));
    }
}
