use crate::batch::BatchOutcome;

/// Render a batch outcome as JSON
pub fn render_json(outcome: &BatchOutcome) -> String {
    serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "null".to_string())
}
