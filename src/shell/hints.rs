//! Inline hints while typing.

use rustyline::Context;
use rustyline::hint::Hinter;
use std::sync::Arc;

use crate::shell::command::CommandRegistry;

/// Suggests the rest of a command name, then the arguments it still needs.
pub struct PassstoreHinter {
    registry: Arc<CommandRegistry>,
}

impl PassstoreHinter {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    fn get_hint(&self, line: &str) -> Option<String> {
        let has_trailing_space = line.ends_with(' ');
        let parts: Vec<&str> = line.split_whitespace().collect();
        let (&command, args) = parts.split_first()?;

        if args.is_empty() && !has_trailing_space {
            let completions = self.registry.completions(command);
            return match completions.as_slice() {
                [only] if only != command => Some(only[command.len()..].to_string()),
                _ => None,
            };
        }

        let cmd = self.registry.get(command)?;
        if args.len() >= cmd.min_args() {
            return None;
        }

        // Usage text is "<name> <arg> ...", possibly shown under an alias.
        let remaining: Vec<&str> = cmd
            .usage()
            .split_whitespace()
            .skip(1 + args.len())
            .collect();
        if remaining.is_empty() {
            return None;
        }

        let separator = if has_trailing_space { "" } else { " " };
        Some(format!("{}{}", separator, remaining.join(" ")))
    }
}

impl Hinter for PassstoreHinter {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<Self::Hint> {
        if pos < line.len() {
            return None;
        }

        self.get_hint(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::register_all;

    fn setup_hinter() -> PassstoreHinter {
        let mut registry = CommandRegistry::new();
        register_all(&mut registry);
        PassstoreHinter::new(Arc::new(registry))
    }

    #[test]
    fn test_command_completion_hint() {
        let hinter = setup_hinter();
        assert_eq!(hinter.get_hint("sea"), Some("rch".to_string()));
        assert_eq!(hinter.get_hint("hel"), Some("p".to_string()));
    }

    #[test]
    fn test_ambiguous_prefix_has_no_hint() {
        let hinter = setup_hinter();
        assert!(hinter.get_hint("e").is_none());
        assert!(hinter.get_hint("list").is_none());
    }

    #[test]
    fn test_usage_hint_for_missing_arguments() {
        let hinter = setup_hinter();

        let hint = hinter.get_hint("add ").unwrap();
        assert!(hint.starts_with("<url>"));
        assert!(hint.contains("<secret>"));

        let hint = hinter.get_hint("add site.com").unwrap();
        assert!(hint.starts_with(" <username>"));
    }

    #[test]
    fn test_usage_hint_through_alias() {
        let hinter = setup_hinter();
        assert_eq!(hinter.get_hint("rm "), Some("<row>".to_string()));
    }

    #[test]
    fn test_no_hint_when_args_complete() {
        let hinter = setup_hinter();
        assert!(hinter.get_hint("add site.com bob hunter2").is_none());
        assert!(hinter.get_hint("remove 1").is_none());
    }

    #[test]
    fn test_empty_line_no_hint() {
        let hinter = setup_hinter();
        assert!(hinter.get_hint("").is_none());
        assert!(hinter.get_hint("   ").is_none());
    }
}
