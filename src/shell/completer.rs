//! Tab completion for command names.

use rustyline::Context;
use rustyline::completion::{Completer, Pair};
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Completes command names, and command names after `help`.
pub struct PassstoreCompleter {
    registry: Arc<CommandRegistry>,
}

impl PassstoreCompleter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn complete_command(&self, partial: &str) -> Vec<Pair> {
        self.registry
            .completions(partial)
            .into_iter()
            .map(|s| Pair {
                display: s.clone(),
                replacement: s,
            })
            .collect()
    }

    /// Works out what the word under the cursor is.
    fn parse_context<'a>(&self, line: &'a str, pos: usize) -> CompletionContext<'a> {
        let line_to_pos = &line[..pos];
        let parts: Vec<&str> = line_to_pos.split_whitespace().collect();
        let ends_with_space = line_to_pos.ends_with(' ');

        match parts.as_slice() {
            [] => CompletionContext::Command { partial: "" },
            [partial] if !ends_with_space => CompletionContext::Command { partial: *partial },
            [command, rest @ ..] => {
                let (arg_index, partial) = if ends_with_space {
                    (rest.len(), "")
                } else {
                    (rest.len() - 1, *rest.last().unwrap_or(&""))
                };
                CompletionContext::Argument {
                    command: *command,
                    arg_index,
                    partial,
                }
            }
        }
    }
}

enum CompletionContext<'a> {
    Command {
        partial: &'a str,
    },
    Argument {
        command: &'a str,
        arg_index: usize,
        partial: &'a str,
    },
}

impl Completer for PassstoreCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        match self.parse_context(line, pos) {
            CompletionContext::Command { partial } => {
                Ok((pos - partial.len(), self.complete_command(partial)))
            }
            CompletionContext::Argument {
                command,
                arg_index,
                partial,
            } => {
                let is_help = self
                    .registry
                    .get(command)
                    .is_some_and(|cmd| cmd.name() == "help");
                let completions = if is_help && arg_index == 0 {
                    self.complete_command(partial)
                } else {
                    vec![]
                };
                Ok((pos - partial.len(), completions))
            }
        }
    }
}
