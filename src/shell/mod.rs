//! Interactive shell over a [`ViewCoordinator`].
//!
//! This module provides a shell-like interface with:
//! - Command and `help` topic completion
//! - Highlighting that masks secrets as they are typed
//! - Usage hints
//! - Persistent history that never records secrets

pub mod command;
pub mod commands;
pub mod completer;
pub mod highlighter;
pub mod hints;
pub mod history;

use anyhow::Result;
use rustyline::completion::Completer;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::FileHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow;
use std::sync::Arc;

use crate::logging::timed;
use crate::view::ViewCoordinator;

use command::{CommandRegistry, CommandResult, ShellContext};
use commands::register_all;
use completer::PassstoreCompleter;
use highlighter::{OutputHighlighter, PassstoreHighlighter};
use hints::PassstoreHinter;
use history::{HistoryConfig, HistoryFilter};

const PROMPT: &str = "passstore> ";

/// Combined helper for rustyline that provides all shell features.
pub struct PassstoreHelper {
    completer: PassstoreCompleter,
    highlighter: PassstoreHighlighter,
    hinter: PassstoreHinter,
}

impl PassstoreHelper {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self {
            completer: PassstoreCompleter::new(Arc::clone(&registry)),
            highlighter: PassstoreHighlighter::new(Arc::clone(&registry)),
            hinter: PassstoreHinter::new(registry),
        }
    }
}

impl Completer for PassstoreHelper {
    type Candidate = rustyline::completion::Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Self::Candidate>)> {
        self.completer.complete(line, pos, ctx)
    }
}

impl Highlighter for PassstoreHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        self.highlighter.highlight_prompt(prompt, default)
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        self.highlighter.highlight_hint(hint)
    }

    fn highlight_candidate<'c>(
        &self,
        candidate: &'c str,
        completion: rustyline::CompletionType,
    ) -> Cow<'c, str> {
        self.highlighter.highlight_candidate(candidate, completion)
    }

    fn highlight_char(&self, line: &str, pos: usize, kind: rustyline::highlight::CmdKind) -> bool {
        self.highlighter.highlight_char(line, pos, kind)
    }
}

impl Hinter for PassstoreHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, ctx: &Context<'_>) -> Option<Self::Hint> {
        self.hinter.hint(line, pos, ctx)
    }
}

// Every line is submitted as typed. Secrets may contain unbalanced brackets,
// and unbalanced quotes are reported by `execute_line`.
impl Validator for PassstoreHelper {}

impl Helper for PassstoreHelper {}

/// Configuration for the shell.
pub struct ShellConfig {
    pub history: HistoryConfig,
    pub show_welcome: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history: HistoryConfig::default(),
            show_welcome: true,
        }
    }
}

/// The interactive shell.
pub struct Shell {
    registry: Arc<CommandRegistry>,
    config: ShellConfig,
}

impl Shell {
    pub fn new() -> Self {
        Self::with_config(ShellConfig::default())
    }

    pub fn with_config(config: ShellConfig) -> Self {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);

        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Reads and executes lines until `quit` or end of input.
    ///
    /// Every change is saved by the coordinator as it happens, so there is
    /// nothing to flush on exit apart from history.
    pub fn run(&self, view: &mut ViewCoordinator) -> Result<()> {
        let helper = PassstoreHelper::new(Arc::clone(&self.registry));
        let mut editor: Editor<PassstoreHelper, FileHistory> = Editor::new()?;
        editor.set_helper(Some(helper));
        editor.set_max_history_size(self.config.history.max_entries)?;

        let history_path = &self.config.history.path;
        if history_path.exists() {
            if let Err(e) = editor.load_history(history_path) {
                log::warn!("Could not load history: {}", e);
            } else {
                log::debug!("Loaded history from {}", history_path.display());
            }
        }
        let mut history_filter =
            HistoryFilter::new(self.config.history.clone(), Arc::clone(&self.registry));

        if self.config.show_welcome {
            println!(
                "{} records in {}. Type 'help' for available commands.",
                view.len(),
                view.storage().path().display()
            );
        }

        log::info!("Shell started");
        let mut query = String::new();

        loop {
            match editor.readline(PROMPT) {
                Ok(line) => {
                    if history_filter.should_add(&line) {
                        let _ = editor.add_history_entry(line.trim());
                    }

                    match self.execute_line(&line, view, &mut query) {
                        CommandResult::Success(Some(msg)) => println!("{}", msg),
                        CommandResult::Success(None) | CommandResult::Continue => {}
                        CommandResult::Error(msg) => {
                            eprintln!("{}", OutputHighlighter::error(&msg));
                        }
                        CommandResult::Exit => break,
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    log::debug!("Interrupted (Ctrl-C)");
                }
                Err(ReadlineError::Eof) => {
                    println!("exit");
                    log::info!("EOF received (Ctrl-D)");
                    break;
                }
                Err(err) => {
                    eprintln!("{}", OutputHighlighter::error(&format!("Error: {}", err)));
                    log::error!("Readline error: {}", err);
                    break;
                }
            }
        }

        if let Some(parent) = history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = editor.save_history(history_path) {
            log::warn!("Failed to save history: {}", e);
        } else {
            log::debug!("Saved history to {}", history_path.display());
        }

        log::info!("Shell exited");
        Ok(())
    }

    /// Splits `line` like a POSIX shell and runs the named command.
    ///
    /// `query` is the active search; commands may change it.
    pub fn execute_line(
        &self,
        line: &str,
        view: &mut ViewCoordinator,
        query: &mut String,
    ) -> CommandResult {
        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => return CommandResult::error(format!("Could not parse line: {}", e)),
        };
        let Some((name, args)) = words.split_first() else {
            return CommandResult::Continue;
        };

        let Some(cmd) = self.registry.get(name) else {
            return CommandResult::error(format!(
                "Unknown command: '{}'\nType 'help' to see available commands.",
                name
            ));
        };

        if cmd.max_args().is_some_and(|max| args.len() > max) {
            return CommandResult::error(format!(
                "Usage: {}\nToo many arguments; quote values that contain spaces",
                cmd.usage()
            ));
        }

        // Arguments may hold a secret, so only their count is logged.
        log::debug!("Executing '{}' with {} arguments", cmd.name(), args.len());
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let mut ctx = ShellContext::new(view, query).with_registry(&self.registry);
        timed(cmd.name(), || cmd.execute(&args, &mut ctx))
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}
