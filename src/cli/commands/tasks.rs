use crate::config::Config;
use crate::errors::AppResult;
use std::io::{Write, stdout};

/// Handle the `tasks` command
pub fn handle(cfg: &Config) -> AppResult<()> {
    let catalog = cfg.catalog()?;
    let mut out = stdout().lock();
    for (i, name) in catalog.names().iter().enumerate() {
        writeln!(out, "{:>2}. {name}", i + 1)?;
    }
    Ok(())
}
