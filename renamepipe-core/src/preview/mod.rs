mod json;
mod summary;
mod table;

pub use json::render_json;
pub use summary::render_summary;
pub use table::render_table;

use crate::batch::BatchOutcome;
use std::io::{self, IsTerminal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preview {
    Table,
    Json,
    Summary,
    None,
}

impl std::str::FromStr for Preview {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "summary" => Ok(Self::Summary),
            "none" => Ok(Self::None),
            _ => Err(format!("Invalid preview format: {}", s)),
        }
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color_with_detector<F>(use_color: Option<bool>, is_terminal: F) -> bool
where
    F: Fn() -> bool,
{
    match use_color {
        Some(explicit_color) => explicit_color, // Honor explicit color request
        None => is_terminal(),                  // Auto-detect only when not specified
    }
}

/// Determine whether to use colors based on explicit preference or terminal detection
pub fn should_use_color(use_color: Option<bool>) -> bool {
    should_use_color_with_detector(use_color, || io::stdout().is_terminal())
}

/// Render a batch outcome in the specified format
pub fn render_outcome(outcome: &BatchOutcome, format: Preview, use_color: Option<bool>) -> String {
    let use_color = should_use_color(use_color);

    match format {
        Preview::Table => render_table(outcome, use_color),
        Preview::Json => render_json(outcome),
        Preview::Summary => render_summary(outcome),
        Preview::None => String::new(), // Return empty string for no preview
    }
}
