//! Command history management.
//!
//! Lines that carry a secret never reach the history file.

use std::path::PathBuf;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Configuration for command history.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Path to the history file.
    pub path: PathBuf,
    /// Maximum number of entries to keep.
    pub max_entries: usize,
    /// Whether to ignore duplicate consecutive entries.
    pub ignore_dups: bool,
    /// Whether to ignore lines typed with a leading space.
    pub ignore_space: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("history"),
            max_entries: 1000,
            ignore_dups: true,
            ignore_space: true,
        }
    }
}

impl HistoryConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn with_max_entries(mut self, max: usize) -> Self {
        self.max_entries = max;
        self
    }

    pub fn with_ignore_dups(mut self, ignore: bool) -> Self {
        self.ignore_dups = ignore;
        self
    }
}

/// Decides which lines are added to history.
pub struct HistoryFilter {
    config: HistoryConfig,
    registry: Arc<CommandRegistry>,
    last_entry: Option<String>,
}

impl HistoryFilter {
    pub fn new(config: HistoryConfig, registry: Arc<CommandRegistry>) -> Self {
        Self {
            config,
            registry,
            last_entry: None,
        }
    }

    /// Takes the line as typed, before trimming.
    pub fn should_add(&mut self, line: &str) -> bool {
        if self.config.ignore_space && line.starts_with(char::is_whitespace) {
            return false;
        }

        let entry = line.trim();
        // Split as the shell will, so a quoted command name is still recognised.
        // A line that does not split is rejected by the shell and kept out too.
        let Ok(words) = shell_words::split(entry) else {
            return false;
        };
        let Some(command) = words.first() else {
            return false;
        };

        if self
            .registry
            .get(command)
            .is_some_and(|cmd| cmd.secret_arg().is_some())
        {
            log::debug!("Keeping '{}' line out of history", command);
            return false;
        }

        if self.config.ignore_dups && self.last_entry.as_deref() == Some(entry) {
            return false;
        }

        self.last_entry = Some(entry.to_string());
        true
    }
}
