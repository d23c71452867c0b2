//! Command trait and registry for the shell.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use crate::credentials::RecordId;
use crate::error::StoreError;
use crate::view::ViewCoordinator;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub enum CommandResult {
    /// Command executed successfully with optional message.
    Success(Option<String>),
    /// Command failed with error message.
    Error(String),
    /// Signal to exit the shell.
    Exit,
    /// Continue without output.
    Continue,
}

impl CommandResult {
    pub fn success(msg: impl Into<String>) -> Self {
        CommandResult::Success(Some(msg.into()))
    }

    pub fn ok() -> Self {
        CommandResult::Success(None)
    }

    pub fn error(msg: impl Into<String>) -> Self {
        CommandResult::Error(msg.into())
    }

    /// Turns the outcome of a store mutation into a result.
    ///
    /// An unsaved change still happened, so it is reported together with a
    /// warning rather than as a plain failure.
    pub fn from_mutation<T>(
        result: Result<T, StoreError>,
        on_success: impl FnOnce(&[RecordId]) -> String,
        affected: impl FnOnce(&T) -> Vec<RecordId>,
    ) -> Self {
        match result {
            Ok(value) => CommandResult::success(on_success(&affected(&value))),
            Err(e) if e.is_unsaved() => CommandResult::error(format!(
                "{}\nWarning: {}",
                on_success(e.unsaved_records()),
                e
            )),
            Err(e) => CommandResult::error(e.to_string()),
        }
    }
}

/// State available to commands during execution.
pub struct ShellContext<'a> {
    /// The record view the shell presents.
    pub view: &'a mut ViewCoordinator,
    /// Active search text; row numbers refer to the view under this query.
    pub query: &'a mut String,
    /// Reference to the command registry for help command.
    pub registry: Option<&'a CommandRegistry>,
}

impl<'a> ShellContext<'a> {
    pub fn new(view: &'a mut ViewCoordinator, query: &'a mut String) -> Self {
        Self {
            view,
            query,
            registry: None,
        }
    }

    pub fn with_registry(mut self, registry: &'a CommandRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Resolves a 1-based row number, as printed by `list`, to a record id.
    pub fn resolve_row(&self, arg: &str) -> Result<RecordId, String> {
        let row: usize = arg
            .parse()
            .map_err(|_| format!("'{}' is not a row number", arg))?;
        if row == 0 {
            return Err("Rows are numbered from 1".to_string());
        }
        self.view
            .resolve_position(row - 1, self.query.as_str())
            .map_err(|e| e.to_string())
    }
}

/// A command that can be executed in the shell.
pub trait Command: Send + Sync {
    /// Returns the primary name of the command.
    fn name(&self) -> &str;

    /// Returns command aliases (alternative names).
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// Returns a short description of the command.
    fn description(&self) -> &str;

    /// Returns usage information (e.g., "remove <row>").
    fn usage(&self) -> &str;

    /// Returns detailed help text.
    fn help(&self) -> &str {
        self.description()
    }

    /// Executes the command with the given arguments.
    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult;

    /// Returns the minimum number of required arguments.
    fn min_args(&self) -> usize {
        0
    }

    /// Returns the maximum number of arguments (None = unlimited).
    fn max_args(&self) -> Option<usize> {
        None
    }

    /// Position of a secret among the arguments, if the command takes one.
    ///
    /// Lines for such commands are kept out of history and the argument is
    /// masked while typing.
    fn secret_arg(&self) -> Option<usize> {
        None
    }
}

impl fmt::Debug for dyn Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// Registry of all available commands.
pub struct CommandRegistry {
    /// Commands indexed by their primary name.
    commands: HashMap<String, Arc<dyn Command>>,
    /// Alias to primary name mapping.
    aliases: HashMap<String, String>,
    /// Every name and alias, sorted, for completion.
    names: BTreeSet<String>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
            aliases: HashMap::new(),
            names: BTreeSet::new(),
        }
    }

    pub fn register(&mut self, command: Arc<dyn Command>) {
        let name = command.name().to_string();
        self.names.insert(name.clone());

        for alias in command.aliases() {
            self.aliases.insert(alias.to_string(), name.clone());
            self.names.insert(alias.to_string());
        }

        self.commands.insert(name, command);
    }

    /// Looks up a command by name or alias.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        if let Some(cmd) = self.commands.get(name) {
            return Some(Arc::clone(cmd));
        }

        self.aliases
            .get(name)
            .and_then(|primary| self.commands.get(primary))
            .map(Arc::clone)
    }

    pub fn commands(&self) -> impl Iterator<Item = &Arc<dyn Command>> {
        self.commands.values()
    }

    /// Names and aliases starting with `prefix`, sorted.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        self.names
            .range(prefix.to_string()..)
            .take_while(|name| name.starts_with(prefix))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
