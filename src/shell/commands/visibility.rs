//! Commands that reveal and mask secrets in the listing.

use crate::credentials::RecordId;
use crate::error::StoreError;
use crate::shell::command::{Command, CommandResult, ShellContext};

/// Resolves the row argument and applies `action` to the record.
fn on_row(
    args: &[&str],
    ctx: &mut ShellContext,
    usage: &str,
    action: impl FnOnce(&mut ShellContext, RecordId) -> Result<String, StoreError>,
) -> CommandResult {
    let Some(row) = args.first() else {
        return CommandResult::error(format!("Usage: {}\nMissing row number", usage));
    };

    let id = match ctx.resolve_row(row) {
        Ok(id) => id,
        Err(e) => return CommandResult::error(e),
    };

    match action(ctx, id) {
        Ok(msg) => CommandResult::success(msg),
        Err(e) => CommandResult::error(e.to_string()),
    }
}

/// Command to reveal a secret.
pub struct ShowCommand;

impl Command for ShowCommand {
    fn name(&self) -> &str {
        "show"
    }

    fn aliases(&self) -> &[&str] {
        &["reveal"]
    }

    fn description(&self) -> &str {
        "Reveal the secret of a row"
    }

    fn usage(&self) -> &str {
        "show <row>"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        on_row(args, ctx, self.usage(), |ctx, id| {
            ctx.view.reveal(id)?;
            Ok(format!("Secret of {} is now shown", id))
        })
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// Command to mask a secret again.
pub struct HideCommand;

impl Command for HideCommand {
    fn name(&self) -> &str {
        "hide"
    }

    fn description(&self) -> &str {
        "Mask the secret of a row"
    }

    fn usage(&self) -> &str {
        "hide <row>"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        on_row(args, ctx, self.usage(), |ctx, id| {
            ctx.view.hide(id)?;
            Ok(format!("Secret of {} is now masked", id))
        })
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

/// Command to flip between shown and masked.
pub struct ToggleCommand;

impl Command for ToggleCommand {
    fn name(&self) -> &str {
        "toggle"
    }

    fn aliases(&self) -> &[&str] {
        &["t"]
    }

    fn description(&self) -> &str {
        "Show or mask the secret of a row"
    }

    fn usage(&self) -> &str {
        "toggle <row>"
    }

    fn execute(&self, args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        on_row(args, ctx, self.usage(), |ctx, id| {
            let state = if ctx.view.toggle(id)? { "shown" } else { "masked" };
            Ok(format!("Secret of {} is now {}", id, state))
        })
    }

    fn min_args(&self) -> usize {
        1
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::RecordFields;
    use crate::shell::testing::open_view;

    #[test]
    fn test_show_and_hide() {
        let (mut view, _dir) = open_view();
        let id = view.add(RecordFields::new("a.com", "bob", "pw")).unwrap();
        let mut query = String::new();
        let mut ctx = ShellContext::new(&mut view, &mut query);

        assert!(matches!(ShowCommand.execute(&["1"], &mut ctx), CommandResult::Success(_)));
        assert!(ctx.view.is_visible(id));

        assert!(matches!(HideCommand.execute(&["1"], &mut ctx), CommandResult::Success(_)));
        assert!(!ctx.view.is_visible(id));
    }

    #[test]
    fn test_toggle_reports_state() {
        let (mut view, _dir) = open_view();
        view.add(RecordFields::new("a.com", "bob", "pw")).unwrap();
        let mut query = String::new();
        let mut ctx = ShellContext::new(&mut view, &mut query);

        match ToggleCommand.execute(&["1"], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert!(msg.ends_with("shown")),
            _ => panic!("Expected toggle message"),
        }
        match ToggleCommand.execute(&["1"], &mut ctx) {
            CommandResult::Success(Some(msg)) => assert!(msg.ends_with("masked")),
            _ => panic!("Expected toggle message"),
        }
    }

    #[test]
    fn test_toggle_targets_filtered_row() {
        let (mut view, _dir) = open_view();
        let bob = view.add(RecordFields::new("a.com", "bob", "1")).unwrap();
        let alice = view.add(RecordFields::new("b.com", "alice", "2")).unwrap();
        let mut query = String::from("alice");
        let mut ctx = ShellContext::new(&mut view, &mut query);

        ToggleCommand.execute(&["1"], &mut ctx);

        assert!(!view.is_visible(bob));
        assert!(view.is_visible(alice));
    }

    #[test]
    fn test_visibility_commands_reject_bad_rows() {
        let (mut view, _dir) = open_view();
        let mut query = String::new();
        let mut ctx = ShellContext::new(&mut view, &mut query);

        assert!(matches!(ShowCommand.execute(&["1"], &mut ctx), CommandResult::Error(_)));
        assert!(matches!(HideCommand.execute(&[], &mut ctx), CommandResult::Error(_)));
        assert!(matches!(ToggleCommand.execute(&["x"], &mut ctx), CommandResult::Error(_)));
    }
}
