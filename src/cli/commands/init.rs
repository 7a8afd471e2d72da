use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use std::io::stdout;
use std::path::Path;

/// Handle the `init` command
///
/// Creates the config directory and writes a default config file, unless
/// one already exists at `path`.
pub fn handle(path: &Path) -> AppResult<()> {
    let mut out = stdout();

    info(&mut out, "Initializing timekeeper…")?;

    if Config::init(path)? {
        success(&mut out, format!("Config file created: {}", path.display()))?;
    } else {
        info(&mut out, format!("Config file already exists: {}", path.display()))?;
    }

    let cfg = Config::load(path)?;
    info(&mut out, format!("Export file : {}", cfg.export_path().display()))?;
    info(&mut out, format!("Logs        : {}", Config::logs_dir().display()))?;
    Ok(())
}
