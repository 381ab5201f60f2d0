//! Runtime settings read from the environment (and `.env`, loaded in `main`).

use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "BIKESHARE_DATA_DIR";
pub const LOG_FILE_VAR: &str = "LOG_FILE_PATH";

const DEFAULT_LOG_FILE: &str = "logs/bikeshare_stats.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `chicago.csv`, `new_york_city.csv` and `washington.csv`.
    pub data_dir: PathBuf,
    pub log_file_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            log_file_path: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; blank values fall
    /// back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            data_dir: var(DATA_DIR_VAR).map_or(defaults.data_dir, PathBuf::from),
            log_file_path: var(LOG_FILE_VAR).map_or(defaults.log_file_path, PathBuf::from),
        }
    }

    /// A `--data-dir` flag wins over the environment.
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}
