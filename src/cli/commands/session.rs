use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::TimeTracker;
use crate::errors::AppResult;
use crate::ui::{Shell, ShellOptions};
use crate::utils::path::expand_tilde;
use std::io::{self, IsTerminal};
use tracing::info;

/// Handle the `session` command: run the interactive shell on stdin/stdout.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Session {
        task,
        file,
        autosave,
        no_confirm,
    } = cmd
    else {
        return Ok(());
    };

    let export_path = file
        .as_deref()
        .map(expand_tilde)
        .unwrap_or_else(|| cfg.export_path());

    let opts = ShellOptions {
        export_path,
        confirm_switch: cfg.confirm_switch && !*no_confirm,
        autosave: cfg.autosave || *autosave,
        styled: io::stdout().is_terminal(),
        ..ShellOptions::default()
    };

    info!(export = %opts.export_path.display(), "session opened");

    let tracker = TimeTracker::new(cfg.catalog()?);
    let mut shell = Shell::new(tracker, opts, io::stdin().lock(), io::stdout());

    if let Some(task) = task {
        shell.handle_line(&format!("start {task}"))?;
    }

    shell.run()
}
