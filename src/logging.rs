//! Logging setup for passstore.
//!
//! Everything goes to a log file with timestamps; warnings and errors are
//! also echoed to the terminal. Record secrets are never logged.

use anyhow::{Result, anyhow};
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Configuration for the logging system.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Path to the log file.
    pub path: PathBuf,
    /// Minimum level written to the log file.
    pub level: LevelFilter,
    /// Size in bytes above which the file is rotated at startup (0 = never).
    pub max_size: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("passstore.log"),
            level: LevelFilter::Info,
            max_size: 5 * 1024 * 1024,
        }
    }
}

impl LogConfig {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            ..Default::default()
        }
    }

    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }
}

/// Initializes the global logger.
///
/// Can only succeed once per process; later calls return an error.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    if let Some(parent) = config.path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if needs_rotation(config) {
        rotate_log(&config.path)?;
    }

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.path)
        .map_err(|e| anyhow!("Failed to open log file {}: {}", config.path.display(), e))?;

    let file_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Debug)
        .build();

    let term_config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> =
        vec![WriteLogger::new(config.level, file_config, log_file)];

    if in_terminal() {
        loggers.push(TermLogger::new(
            LevelFilter::Warn,
            term_config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow!("Failed to initialize logger: {}", e))?;

    log::info!("Logging initialized at level {:?}", config.level);
    log::debug!("Log file: {}", config.path.display());
    Ok(())
}

fn needs_rotation(config: &LogConfig) -> bool {
    config.max_size > 0
        && std::fs::metadata(&config.path)
            .map(|m| m.len() > config.max_size)
            .unwrap_or(false)
}

fn in_terminal() -> bool {
    std::env::var("TERM").is_ok()
}

/// Renames the log file with a timestamp suffix.
fn rotate_log(path: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("passstore.log");

    let rotated = path.with_file_name(format!("{}.{}", file_name, timestamp));
    std::fs::rename(path, &rotated)?;
    Ok(rotated)
}

/// Runs `f` and logs how long it took at debug level.
pub fn timed<T, F: FnOnce() -> T>(operation: &str, f: F) -> T {
    let start = std::time::Instant::now();
    let result = f();
    log::debug!("{} completed in {:?}", operation, start.elapsed());
    result
}
