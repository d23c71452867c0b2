use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;

use passstore::cli::{Cli, Commands};
use passstore::shell::ShellConfig;
use passstore::shell::command::ShellContext;
use passstore::shell::commands::render_view;
use passstore::shell::highlighter::OutputHighlighter;
use passstore::{AppConfig, CsvStorage, Shell, ViewCoordinator, init_logging};

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("{}", OutputHighlighter::error(&format!("Error: {:#}", e)));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = AppConfig::from_home()?.with_log_level(cli.log_level.into());
    if let Some(file) = &cli.file {
        config = config.with_storage_file(file);
    }

    if let Err(e) = init_logging(&config.log_config()) {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
    log::info!("Using data file {}", config.storage_file.display());

    let (mut view, load_error) = ViewCoordinator::open(CsvStorage::new(&config.storage_file));
    if let Some(e) = load_error {
        eprintln!(
            "{}",
            OutputHighlighter::warning(&format!(
                "Could not load {}: {}\nStarting with an empty collection; the next change will replace the file.",
                config.storage_file.display(),
                e
            ))
        );
    }

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => {
            let shell = Shell::with_config(ShellConfig {
                history: config.history_config(),
                show_welcome: !cli.quiet,
            });
            shell.run(&mut view)?;
        }
        Commands::List { query } => {
            let mut query = query.unwrap_or_default();
            let ctx = ShellContext::new(&mut view, &mut query);
            println!("{}", render_view(&ctx));
        }
        Commands::Import { path } => match view.import(&path) {
            Ok(ids) => println!("Imported {} records from {}", ids.len(), path.display()),
            Err(e) if e.is_unsaved() => {
                println!(
                    "Imported {} records from {}",
                    e.unsaved_records().len(),
                    path.display()
                );
                return Err(e).context("Imported records were not saved");
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Export { path } => {
            let count = view
                .export(&path)
                .with_context(|| format!("Export to {} failed", path.display()))?;
            println!("Exported {} records to {}", count, path.display());
        }
    }

    Ok(())
}
