use crate::cli::parser::Commands;
use crate::config::Config;
use crate::config::check::fill_missing_fields;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success, warning};
use std::io::stdout;
use std::path::Path;
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cmd: &Commands, cfg: &Config, path: &Path) -> AppResult<()> {
    let Commands::Config {
        print_config,
        check,
        edit_config,
        editor,
    } = cmd
    else {
        return Ok(());
    };

    let mut out = stdout();

    if *print_config {
        info(&mut out, format!("Current configuration ({}):", path.display()))?;
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if *check {
        let added = fill_missing_fields(path)?;
        if added.is_empty() {
            success(&mut out, "Configuration is complete")?;
        } else {
            success(
                &mut out,
                format!("Added missing fields: {}", added.join(", ")),
            )?;
        }
    }

    if *edit_config {
        edit(path, editor.as_deref())?;
    }

    Ok(())
}

/// Open the config file in the requested editor, falling back to
/// `$EDITOR`/`$VISUAL` or the platform default.
fn edit(path: &Path, requested: Option<&str>) -> AppResult<()> {
    let mut out = stdout();

    if !path.exists() {
        Config::init(path)?;
    }

    let default_editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    let editor_to_use = requested.map(str::to_string).unwrap_or_else(|| default_editor.clone());

    match Command::new(&editor_to_use).arg(path).status() {
        Ok(s) if s.success() => {
            success(&mut out, format!("Configuration edited with '{editor_to_use}'"))?;
            return Ok(());
        }
        _ if editor_to_use == default_editor => {
            error(&mut out, format!("Failed to run editor '{editor_to_use}'"))?;
            return Ok(());
        }
        _ => {}
    }

    warning(
        &mut out,
        format!("Editor '{editor_to_use}' not available, falling back to '{default_editor}'"),
    )?;
    match Command::new(&default_editor).arg(path).status() {
        Ok(s) if s.success() => {
            success(&mut out, format!("Configuration edited with '{default_editor}'"))?
        }
        _ => error(&mut out, format!("Failed to run editor '{default_editor}'"))?,
    }

    Ok(())
}
