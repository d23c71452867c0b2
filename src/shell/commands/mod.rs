//! Individual command implementations.

mod add;
mod edit;
mod help;
mod list;
mod quit;
mod remove;
mod search;
mod transfer;
mod visibility;

pub use add::AddCommand;
pub use edit::EditCommand;
pub use help::HelpCommand;
pub use list::{ListCommand, render_view};
pub use quit::QuitCommand;
pub use remove::RemoveCommand;
pub use search::{ResetCommand, SearchCommand};
pub use transfer::{ExportCommand, ImportCommand};
pub use visibility::{HideCommand, ShowCommand, ToggleCommand};

use std::sync::Arc;

use super::command::CommandRegistry;
use crate::credentials::RecordFields;

/// Registers all built-in commands with the registry.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(Arc::new(ListCommand));
    registry.register(Arc::new(SearchCommand));
    registry.register(Arc::new(ResetCommand));
    registry.register(Arc::new(AddCommand));
    registry.register(Arc::new(EditCommand));
    registry.register(Arc::new(RemoveCommand));
    registry.register(Arc::new(ShowCommand));
    registry.register(Arc::new(HideCommand));
    registry.register(Arc::new(ToggleCommand));
    registry.register(Arc::new(ImportCommand));
    registry.register(Arc::new(ExportCommand));
    registry.register(Arc::new(HelpCommand));
    registry.register(Arc::new(QuitCommand));
}

/// Builds record fields from `<url> <username> <secret> [comment] [tags]`.
///
/// The caller has already checked that at least three arguments are present.
fn fields_from_args(args: &[&str]) -> RecordFields {
    let optional = |i: usize| args.get(i).copied().unwrap_or_default();
    RecordFields::new(args[0], args[1], args[2])
        .with_comment(optional(3))
        .with_tags(optional(4))
}
