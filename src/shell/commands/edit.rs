//! Edit command implementation.

use super::fields_from_args;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to replace the fields of an existing record.
pub struct EditCommand;

impl Command for EditCommand {
    fn name(&self) -> &str {
        "edit"
    }

    fn aliases(&self) -> &[&str] {
        &["e", "update"]
    }

    fn description(&self) -> &str {
        "Replace the fields of a record"
    }

    fn usage(&self) -> &str {
        "edit <row> <url> <username> <secret> [comment] [tags]"
    }

    fn help(&self) -> &str {
        "Replace every field of the record shown at <row>.\n\n\
         Rows are the numbers printed by 'list' under the active search.\n\
         Omitted comment and tags are cleared, and the new password is masked.\n\
         This line is not saved to history.\n\n\
         Examples:\n  \
           edit 2 github.com bob n3wpass\n  \
           edit 1 mail.example alice secret \"\" personal"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.len() < self.min_args() {
            return CommandResult::error(format!(
                "Usage: {}\nMissing required arguments",
                self.usage()
            ));
        }

        let id = match ctx.resolve_row(args[0]) {
            Ok(id) => id,
            Err(e) => return CommandResult::error(e),
        };

        CommandResult::from_mutation(
            ctx.view.update(id, fields_from_args(&args[1..])),
            |_| format!("Updated row {} ({})", args[0], id),
            |_| vec![id],
        )
    }

    fn min_args(&self) -> usize {
        4
    }

    fn max_args(&self) -> Option<usize> {
        Some(6)
    }

    fn secret_arg(&self) -> Option<usize> {
        Some(3)
    }
}
