use crate::batch::{BatchOutcome, Resolution};
use std::fmt::Write;

/// Render a batch outcome as a compact summary
pub fn render_summary(outcome: &BatchOutcome) -> String {
    let mut output = String::new();

    writeln!(output, "[BATCH SUMMARY]").unwrap();
    writeln!(output, "Files: {}", outcome.files.len()).unwrap();
    writeln!(output, "Renamed: {}", outcome.renamed_count()).unwrap();
    writeln!(output, "Excluded: {}", outcome.excluded_count()).unwrap();
    writeln!(output, "Collisions: {}", outcome.collisions.len()).unwrap();

    if !outcome.collisions.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[COLLISIONS]").unwrap();
        for collision in &outcome.collisions {
            writeln!(
                output,
                "{}: {}",
                collision.name,
                collision.original_names.join(", ")
            )
            .unwrap();
        }
    }

    let excluded: Vec<&str> = outcome
        .files
        .iter()
        .filter(|file| file.resolution == Resolution::Excluded)
        .map(|file| file.original_name.as_str())
        .collect();
    if !excluded.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "[EXCLUDED]").unwrap();
        for name in excluded {
            writeln!(output, "{}", name).unwrap();
        }
    }

    output
}
