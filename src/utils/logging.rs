//! Diagnostic logging: `tracing` events go to a daily rolling file under
//! the config directory, and to stderr as well with `--verbose`.

use crate::errors::{AppError, AppResult};
use std::path::Path;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

pub const LOG_PREFIX: &str = "timekeeper";

/// Reject unknown levels instead of silently logging nothing.
fn parse_filter(directive: &str) -> AppResult<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| AppError::Logging(format!("invalid log filter '{directive}': {e}")))
}

pub fn enable_logging(logs_dir: &Path, level: &str, verbose: bool) -> AppResult<()> {
    let appender = tracing_appender::rolling::Builder::new()
        .rotation(Rotation::DAILY)
        .max_log_files(7)
        .filename_prefix(LOG_PREFIX)
        .filename_suffix("log")
        .build(logs_dir)
        .map_err(|e| AppError::Logging(e.to_string()))?;

    let stderr = std::io::stderr.with_filter(move |_| verbose);

    let directive = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!("{}={level}", env!("CARGO_PKG_NAME").replace('-', "_"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(parse_filter(&directive)?)
        .with_ansi(false)
        .with_target(false)
        .with_writer(stderr.and(appender))
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_levels_parse() {
        assert!(parse_filter("timekeeper=info").is_ok());
        assert!(parse_filter("timekeeper=trace").is_ok());
    }

    #[test]
    fn unknown_level_is_reported() {
        let err = parse_filter("timekeeper=verbose").unwrap_err();
        assert!(matches!(err, AppError::Logging(_)));
        assert!(err.to_string().contains("timekeeper=verbose"));
    }
}
