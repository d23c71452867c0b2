//! Import and export commands.

use std::path::Path;

use crate::shell::command::{Command, CommandResult, ShellContext};

/// Command to append the rows of another table.
pub struct ImportCommand;

impl Command for ImportCommand {
    fn name(&self) -> &str {
        "import"
    }

    fn description(&self) -> &str {
        "Append records from a CSV file"
    }

    fn usage(&self) -> &str {
        "import <path>"
    }

    fn help(&self) -> &str {
        "Append every row of a CSV file to the collection, in file order.\n\n\
         The file needs url, username and password columns; comment and\n\
         tags are optional. Rows are not deduplicated against existing records.\n\n\
         Examples:\n  \
           import ~/Downloads/export.csv"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(path) = args.first() else {
            return CommandResult::error(format!("Usage: {}\nMissing file path", self.usage()));
        };

        CommandResult::from_mutation(
            ctx.view.import(Path::new(path)),
            |ids| format!("Imported {} records from {}", ids.len(), path),
            |ids| ids.clone(),
        )
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// Command to write the collection to another file.
pub struct ExportCommand;

impl Command for ExportCommand {
    fn name(&self) -> &str {
        "export"
    }

    fn description(&self) -> &str {
        "Write all records to a CSV file"
    }

    fn usage(&self) -> &str {
        "export <path>"
    }

    fn help(&self) -> &str {
        "Write the whole collection to a CSV file, ignoring the active search.\n\n\
         Secrets are written in plain text regardless of what is shown.\n\n\
         Examples:\n  \
           export backup.csv"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(path) = args.first() else {
            return CommandResult::error(format!("Usage: {}\nMissing file path", self.usage()));
        };

        match ctx.view.export(Path::new(path)) {
            Ok(count) => CommandResult::success(format!("Exported {} records to {}", count, path)),
            Err(e) => CommandResult::error(e.to_string()),
        }
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
