//! Search and reset commands.

use super::render_view;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to set the active search.
pub struct SearchCommand;

impl Command for SearchCommand {
    fn name(&self) -> &str {
        "search"
    }

    fn aliases(&self) -> &[&str] {
        &["find", "/"]
    }

    fn description(&self) -> &str {
        "Filter records by url or username"
    }

    fn usage(&self) -> &str {
        "search <text>"
    }

    fn help(&self) -> &str {
        "Show only records whose url or username contains <text>,\n\
         ignoring case. The search stays active, and row numbers used by\n\
         other commands refer to the filtered list, until 'reset'.\n\n\
         Examples:\n  \
           search github\n  \
           / bob"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.is_empty() {
            return CommandResult::error(format!("Usage: {}\nMissing search text", self.usage()));
        }

        *ctx.query = args.join(" ");
        log::debug!("Search set to {:?}", ctx.query);
        CommandResult::success(render_view(ctx))
    }

    fn min_args(&self) -> usize {
        1
    }
}

/// Command to clear the active search.
pub struct ResetCommand;

impl Command for ResetCommand {
    fn name(&self) -> &str {
        "reset"
    }

    fn aliases(&self) -> &[&str] {
        &["clear"]
    }

    fn description(&self) -> &str {
        "Clear the active search"
    }

    fn usage(&self) -> &str {
        "reset"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        ctx.query.clear();
        CommandResult::success(render_view(ctx))
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
