use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "passstore")]
#[command(version = "0.1")]
#[command(about = "Keeps your site credentials in a plain CSV table", long_about = None)]
pub struct Cli {
    /// Data file to use instead of ~/.passstore/passwords.csv
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Level written to the log file
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Skip the welcome banner in the shell
    #[arg(short, long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive shell (default).
    Shell,
    /// Print the records, optionally filtered by url or username.
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text to search for
        query: Option<String>,
    },
    /// Append every row of a CSV table to the collection.
    Import {
        /// Table with url, username, password and optional comment, tags columns
        path: PathBuf,
    },
    /// Write the whole collection to a CSV table.
    Export {
        /// Destination file
        path: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
