//! Remove command implementation.

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to delete a record.
pub struct RemoveCommand;

impl Command for RemoveCommand {
    fn name(&self) -> &str {
        "remove"
    }

    fn aliases(&self) -> &[&str] {
        &["rm", "delete", "del"]
    }

    fn description(&self) -> &str {
        "Delete a record"
    }

    fn usage(&self) -> &str {
        "remove <row>"
    }

    fn help(&self) -> &str {
        "Delete the record shown at <row> and save the collection.\n\n\
         Rows are the numbers printed by 'list' under the active search.\n\n\
         Examples:\n  \
           remove 3\n  \
           rm 1"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.is_empty() {
            return CommandResult::error(format!("Usage: {}\nMissing row number", self.usage()));
        }

        let id = match ctx.resolve_row(args[0]) {
            Ok(id) => id,
            Err(e) => return CommandResult::error(e),
        };

        CommandResult::from_mutation(
            ctx.view.delete(id),
            |_| format!("Removed row {} ({})", args[0], id),
            |record| vec![record.id()],
        )
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
