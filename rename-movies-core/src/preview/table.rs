use super::display_name;
use crate::plan::RenamePlan;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use std::io::{self, IsTerminal};

/// Render plan as a table of source, target and raw suggestion.
pub fn render_table(plan: &RenamePlan, use_color: bool) -> String {
    let mut table = Table::new();

    if io::stdout().is_terminal() {
        table.set_content_arrangement(ContentArrangement::Dynamic);
    } else {
        table.set_content_arrangement(ContentArrangement::Disabled);
    }

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Source").fg(Color::Cyan),
            Cell::new("Target").fg(Color::Cyan),
            Cell::new("Suggestion").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Source", "Target", "Suggestion"]);
    }

    for entry in plan.entries() {
        let from = display_name(&entry.source);
        let to = display_name(&entry.target);
        // Suggestions can span lines; the table shows the first one
        let suggestion = entry.suggestion.lines().next().unwrap_or_default().trim();

        if use_color {
            table.add_row(vec![
                Cell::new(from),
                Cell::new(format!("→ {to}")).fg(Color::Magenta),
                Cell::new(suggestion).fg(Color::DarkGrey),
            ]);
        } else {
            table.add_row(vec![from, format!("→ {to}"), suggestion.to_string()]);
        }
    }

    table.to_string()
}
