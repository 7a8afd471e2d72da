//! timekeeper library root.
//! Exposes the CLI parser, the high-level run() function, and the tracker
//! core so it can be driven without a terminal.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use std::io::IsTerminal;
use std::path::Path;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, config_path: &Path) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(config_path),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg, config_path),
        Commands::Tasks => cli::commands::tasks::handle(cfg),
        Commands::Session { .. } => cli::commands::session::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    ui::messages::set_styled(std::io::stdout().is_terminal());

    let config_path = utils::path::resolve_config_path(cli.config.as_deref());

    // `init` and `config --check` must work on a broken or missing file
    let cfg = match &cli.command {
        Commands::Init | Commands::Config { check: true, .. } => {
            Config::load(&config_path).unwrap_or_default()
        }
        _ => Config::load(&config_path)?,
    };

    if let Err(e) = utils::logging::enable_logging(&Config::logs_dir(), &cfg.log_level, cli.verbose)
    {
        eprintln!("⚠️  {e}");
    }

    tracing::debug!(config = %config_path.display(), command = ?cli.command, "starting");

    dispatch(&cli, &cfg, &config_path)
}
