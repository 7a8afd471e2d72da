use crate::errors::{AppError, AppResult};
use crate::models::TaskCatalog;
use crate::models::task::DEFAULT_TASKS;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod check;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_export_file")]
    pub export_file: String,
    #[serde(default = "default_tasks")]
    pub tasks: Vec<String>,
    #[serde(default = "default_true")]
    pub confirm_switch: bool,
    #[serde(default)]
    pub autosave: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_export_file() -> String {
    "time_log.csv".to_string()
}
fn default_tasks() -> Vec<String> {
    DEFAULT_TASKS.iter().map(|s| s.to_string()).collect()
}
fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_file: default_export_file(),
            tasks: default_tasks(),
            confirm_switch: true,
            autosave: false,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".timekeeper")
    }

    /// Return the full path of the default config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timekeeper.conf")
    }

    /// Directory for the rolling diagnostic logs
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load configuration from `path`, or return defaults if it does not exist
    pub fn load(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let cfg: Config = serde_yaml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Write a default config at `path` unless one already exists.
    /// Returns true when a new file was created.
    pub fn init(path: &Path) -> AppResult<bool> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save(path)?;
        Ok(true)
    }

    pub fn validate(&self) -> AppResult<()> {
        self.catalog()?;
        if self.export_file.trim().is_empty() {
            return Err(AppError::Config("export_file must not be empty".into()));
        }
        Ok(())
    }

    pub fn catalog(&self) -> AppResult<TaskCatalog> {
        TaskCatalog::new(self.tasks.iter().cloned())
    }

    /// Export path with `~/` expanded
    pub fn export_path(&self) -> PathBuf {
        expand_tilde(&self.export_file)
    }
}
