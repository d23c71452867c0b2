//! Help command implementation.

use crate::shell::command::{Command, CommandRegistry, CommandResult, ShellContext};

/// One line per command, sorted by name.
fn overview(registry: &CommandRegistry) -> String {
    let mut commands: Vec<_> = registry.commands().collect();
    commands.sort_by_key(|c| c.name().to_string());

    let width = commands.iter().map(|c| c.usage().len()).max().unwrap_or(0);
    let mut output = String::from("Available commands:\n\n");
    for cmd in commands {
        output.push_str(&format!("  {:<width$}  {}\n", cmd.usage(), cmd.description(), width = width));
    }
    output.push_str("\nRows are numbered as shown by 'list'.");
    output.push_str("\nType 'help <command>' for details and aliases.");
    output
}

/// Command to display help information.
pub struct HelpCommand;

impl Command for HelpCommand {
    fn name(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["h", "?"]
    }

    fn description(&self) -> &str {
        "Display help information"
    }

    fn usage(&self) -> &str {
        "help [command]"
    }

    fn help(&self) -> &str {
        "Display help information about commands.\n\n\
         Without arguments, lists all available commands.\n\
         With a command name, shows detailed help for that command.\n\n\
         Examples:\n  \
           help\n  \
           help add\n  \
           ? search"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        let Some(registry) = ctx.registry else {
            return CommandResult::error("Help not available (no registry)");
        };

        let Some(name) = args.first() else {
            return CommandResult::success(overview(registry));
        };

        match registry.get(name) {
            Some(cmd) => {
                let aliases = if cmd.aliases().is_empty() {
                    String::new()
                } else {
                    format!("\nAliases: {}", cmd.aliases().join(", "))
                };
                CommandResult::success(format!(
                    "{}\n\nUsage: {}{}\n\n{}",
                    cmd.name().to_uppercase(),
                    cmd.usage(),
                    aliases,
                    cmd.help()
                ))
            }
            None => CommandResult::error(format!(
                "Unknown command: '{}'\nType 'help' to see available commands.",
                name
            )),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}
