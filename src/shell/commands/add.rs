//! Add command implementation.

use super::fields_from_args;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to add a new credential record.
pub struct AddCommand;

impl Command for AddCommand {
    fn name(&self) -> &str {
        "add"
    }

    fn aliases(&self) -> &[&str] {
        &["a", "new"]
    }

    fn description(&self) -> &str {
        "Add a new record"
    }

    fn usage(&self) -> &str {
        "add <url> <username> <secret> [comment] [tags]"
    }

    fn help(&self) -> &str {
        "Append a new record to the collection and save it.\n\n\
         Arguments:\n  \
           <url>      - Site the credential belongs to\n  \
           <username> - Login name\n  \
           <secret>   - Password, stored as given\n  \
           [comment]  - Optional free text\n  \
           [tags]     - Optional tags\n\n\
         Quote arguments that contain spaces. This line is not saved to history.\n\n\
         Examples:\n  \
           add github.com bob hunter2\n  \
           add mail.example alice \"pass with spaces\" \"old account\" personal"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        if args.len() < self.min_args() {
            return CommandResult::error(format!(
                "Usage: {}\nMissing required arguments",
                self.usage()
            ));
        }

        let fields = fields_from_args(args);
        let url = fields.url.clone();
        CommandResult::from_mutation(
            ctx.view.add(fields),
            |ids| match ids.first() {
                Some(id) => format!("Added {} for '{}'", id, url),
                None => format!("Added '{}'", url),
            },
            |id| vec![*id],
        )
    }

    fn min_args(&self) -> usize {
        3
    }

    fn max_args(&self) -> Option<usize> {
        Some(5)
    }

    fn secret_arg(&self) -> Option<usize> {
        Some(2)
    }
}
