//! `config --check`: report keys missing from the config file and write
//! them back with their default values. Existing values are never touched.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Returns the keys that were added. A missing file is created with
/// every key.
pub fn fill_missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let defaults = serde_yaml::to_value(Config::default())?;
    let Value::Mapping(defaults) = defaults else {
        return Ok(Vec::new());
    };

    let mut current = if path.exists() {
        match serde_yaml::from_str::<Value>(&fs::read_to_string(path)?)? {
            Value::Mapping(m) => m,
            Value::Null => Mapping::new(),
            _ => {
                return Err(AppError::Config(format!(
                    "{} is not a YAML mapping",
                    path.display()
                )));
            }
        }
    } else {
        Mapping::new()
    };

    let mut added = Vec::new();
    for (key, value) in defaults {
        if !current.contains_key(&key) {
            if let Some(k) = key.as_str() {
                added.push(k.to_string());
            }
            current.insert(key, value);
        }
    }

    if !added.is_empty() {
        if let Some(dir) = path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(&Value::Mapping(current))?)?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_only_missing_keys() {
        let p = std::env::temp_dir().join("timekeeper_check_missing.conf");
        fs::write(&p, "export_file: /tmp/x.csv\nautosave: true\n").unwrap();

        let added = fill_missing_fields(&p).unwrap();
        assert_eq!(added, vec!["tasks", "confirm_switch", "log_level"]);

        let cfg = Config::load(&p).unwrap();
        assert_eq!(cfg.export_file, "/tmp/x.csv");
        assert!(cfg.autosave);
        assert_eq!(cfg.tasks.len(), 5);

        assert!(fill_missing_fields(&p).unwrap().is_empty());
        fs::remove_file(&p).ok();
    }
}
