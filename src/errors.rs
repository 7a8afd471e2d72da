//! Unified application error type.
//! Tracker, export, config and cli modules all return AppError so the
//! session shell can surface any failure the same way.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Session state
    // ---------------------------
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl AppError {
    /// True for the errors a user can trigger from the session shell
    /// without anything being wrong with the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidState(_) | AppError::UnknownTask(_) | AppError::InvalidCommand(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
