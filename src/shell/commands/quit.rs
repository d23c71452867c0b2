use crate::shell::command::{Command, CommandResult, ShellContext};

/// Leaves the shell. Changes are already on disk by the time this runs.
pub struct QuitCommand;

impl Command for QuitCommand {
    fn name(&self) -> &str {
        "quit"
    }

    fn aliases(&self) -> &[&str] {
        &["exit", "q"]
    }

    fn description(&self) -> &str {
        "Leave the shell"
    }

    fn usage(&self) -> &str {
        "quit"
    }

    fn help(&self) -> &str {
        "Leave the shell. Revealed passwords are masked again next time.\n\
         Ctrl-D does the same."
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        log::info!("Leaving shell with {} records", ctx.view.len());
        CommandResult::Exit
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
