//! Fixed, ordered set of task categories a session can be booked on.

use crate::errors::{AppError, AppResult};

pub const DEFAULT_TASKS: [&str; 5] = [
    "Donation Entry & Letters",
    "Records Management",
    "Minutes",
    "File Scanning",
    "Web Admin",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCatalog {
    names: Vec<String>,
}

impl Default for TaskCatalog {
    fn default() -> Self {
        Self {
            names: DEFAULT_TASKS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TaskCatalog {
    /// Build a catalog, rejecting empty lists, blank names and duplicates.
    pub fn new<I, S>(names: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if name.is_empty() {
                return Err(AppError::Config("task names must not be empty".into()));
            }
            if out.contains(&name) {
                return Err(AppError::Config(format!("duplicate task: {name}")));
            }
            out.push(name);
        }

        if out.is_empty() {
            return Err(AppError::Config("at least one task is required".into()));
        }

        Ok(Self { names: out })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn first(&self) -> &str {
        &self.names[0]
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> AppResult<&str> {
        self.names
            .iter()
            .find(|n| n.as_str() == name)
            .map(String::as_str)
            .ok_or_else(|| AppError::UnknownTask(name.to_string()))
    }

    /// Resolve user input: a 1-based index, an exact name, or a
    /// case-insensitive name.
    pub fn resolve(&self, input: &str) -> AppResult<&str> {
        let input = input.trim();

        if let Ok(idx) = input.parse::<usize>() {
            return idx
                .checked_sub(1)
                .and_then(|i| self.names.get(i))
                .map(String::as_str)
                .ok_or_else(|| AppError::UnknownTask(input.to_string()));
        }

        self.get(input).or_else(|_| {
            self.names
                .iter()
                .find(|n| n.eq_ignore_ascii_case(input))
                .map(String::as_str)
                .ok_or_else(|| AppError::UnknownTask(input.to_string()))
        })
    }
}
