//! List command implementation and the table renderer shared by the
//! search commands.

use crate::shell::command::{Command, CommandResult, ShellContext};
use crate::view::DisplayRow;

const HEADINGS: [&str; 6] = ["#", "URL", "Username", "Password", "Comment", "Tags"];

/// Renders the view under the context's active query as a text table.
pub fn render_view(ctx: &ShellContext) -> String {
    let rows = ctx.view.current_view(ctx.query.as_str());
    let filtered = !ctx.query.is_empty();

    if rows.is_empty() {
        return if filtered {
            format!("No records match '{}'.", ctx.query)
        } else {
            "No records stored.".to_string()
        };
    }

    let mut output = render_table(&rows);
    if filtered {
        output.push_str(&format!(
            "\n\n{} of {} records match '{}'. Type 'reset' to show all.",
            rows.len(),
            ctx.view.len(),
            ctx.query
        ));
    }
    output
}

fn render_table(rows: &[DisplayRow]) -> String {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            [
                (i + 1).to_string(),
                row.url.clone(),
                row.username.clone(),
                row.secret_display.clone(),
                row.comment.clone(),
                row.tags.clone(),
            ]
        })
        .collect();

    let mut widths = HEADINGS.map(|h| h.chars().count());
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let heading: Vec<String> = HEADINGS.iter().map(|h| h.to_string()).collect();
    let mut lines = vec![format_line(&heading, &widths)];
    lines.extend(cells.iter().map(|line| format_line(line, &widths)));
    lines.join("\n")
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Command to show the current view.
pub struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &str {
        "list"
    }

    fn aliases(&self) -> &[&str] {
        &["ls", "l"]
    }

    fn description(&self) -> &str {
        "Show records under the active search"
    }

    fn usage(&self) -> &str {
        "list"
    }

    fn help(&self) -> &str {
        "Display the records matching the active search, or all records\n\
         when no search is active. Secrets are masked unless revealed with 'show'.\n\n\
         Examples:\n  \
           list\n  \
           ls"
    }

    fn execute(&self, _args: &[&str], ctx: &mut ShellContext) -> CommandResult {
        CommandResult::success(render_view(ctx))
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
