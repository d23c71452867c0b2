use anyhow::{Result, anyhow};
use log::LevelFilter;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::shell::history::HistoryConfig;

const DATA_DIR: &str = ".passstore";
const STORAGE_FILE: &str = "passwords.csv";
const LOG_FILE: &str = "passstore.log";
const HISTORY_FILE: &str = "history";

/// File locations and levels for one run of the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_file: PathBuf,
    pub log_file: PathBuf,
    pub history_file: PathBuf,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Everything under `data_dir`, with default file names.
    pub fn in_dir(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            storage_file: data_dir.join(STORAGE_FILE),
            log_file: data_dir.join(LOG_FILE),
            history_file: data_dir.join(HISTORY_FILE),
            log_level: LevelFilter::Info,
            data_dir,
        }
    }

    /// Defaults rooted at `~/.passstore`.
    pub fn from_home() -> Result<Self> {
        let home = dirs_next::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(Self::in_dir(home.join(DATA_DIR)))
    }

    pub fn with_storage_file(mut self, path: impl AsRef<Path>) -> Self {
        self.storage_file = path.as_ref().to_path_buf();
        self
    }

    pub fn with_log_level(mut self, level: LevelFilter) -> Self {
        self.log_level = level;
        self
    }

    pub fn log_config(&self) -> LogConfig {
        LogConfig::new(self.log_file.clone()).with_level(self.log_level)
    }

    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig::new(self.history_file.clone())
    }
}
