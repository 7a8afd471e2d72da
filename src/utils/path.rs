//! Path utilities: expand `~/` and pick the config file to use.

use crate::config::Config;
use std::path::PathBuf;

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

/// `--config` wins over the default location.
pub fn resolve_config_path(cli_override: Option<&str>) -> PathBuf {
    cli_override
        .map(expand_tilde)
        .unwrap_or_else(Config::config_file)
}
