use crate::batch::{BatchOutcome, Resolution};
use comfy_table::{Cell, Color, ContentArrangement, Table};
use nu_ansi_term::Color::Red;
use std::collections::BTreeSet;
use std::fmt::Write;

/// Render a batch outcome as a table, one row per input file in supply
/// order, with contested names listed in a footer block.
pub fn render_table(outcome: &BatchOutcome, use_color: bool) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    // Force styling even in non-TTY environments when colors are explicitly requested
    if use_color {
        table.enforce_styling();
        table.set_header(vec![
            Cell::new("Original").fg(Color::Cyan),
            Cell::new("New name").fg(Color::Cyan),
            Cell::new("Status").fg(Color::Cyan),
        ]);
    } else {
        table.set_header(vec!["Original", "New name", "Status"]);
    }

    let contested: BTreeSet<&str> = outcome
        .collisions
        .iter()
        .map(|collision| collision.name.as_str())
        .collect();

    for file in &outcome.files {
        match &file.resolution {
            Resolution::Renamed(new_name) => {
                let collides = contested.contains(new_name.as_str());
                let status = if collides { "collision" } else { "renamed" };
                if use_color {
                    let status_color = if collides { Color::Red } else { Color::Green };
                    table.add_row(vec![
                        Cell::new(&file.original_name),
                        Cell::new(new_name),
                        Cell::new(status).fg(status_color),
                    ]);
                } else {
                    table.add_row(vec![
                        file.original_name.as_str(),
                        new_name.as_str(),
                        status,
                    ]);
                }
            },
            Resolution::Excluded => {
                if use_color {
                    table.add_row(vec![
                        Cell::new(&file.original_name),
                        Cell::new(""),
                        Cell::new("excluded").fg(Color::DarkGrey),
                    ]);
                } else {
                    table.add_row(vec![file.original_name.as_str(), "", "excluded"]);
                }
            },
        }
    }

    let mut output = table.to_string();
    output.push('\n');

    if !outcome.collisions.is_empty() {
        let header = if use_color {
            Red.bold().paint("Collisions:").to_string()
        } else {
            "Collisions:".to_string()
        };
        write!(output, "\n{}", header).unwrap();
        for collision in &outcome.collisions {
            write!(
                output,
                "\n  {} <- {}",
                collision.name,
                collision.original_names.join(", ")
            )
            .unwrap();
        }
        output.push('\n');
    }

    output
}
