use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One candidate file in a batch run.
///
/// The engine never touches the file system: the caller sources the
/// metadata, and `current_name`/`active` are the only fields the pipeline
/// writes back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FileDescriptor {
    /// Name the file had when the batch was assembled. Immutable per run.
    pub original_name: String,
    /// Working name, rewritten progressively by the rename phase.
    pub current_name: String,
    /// Document type tag, an extension-like token such as `pdf` or `jpg`.
    pub doc_type: String,
    /// Size in bytes.
    #[ts(type = "number")]
    pub size: u64,
    /// Last-modified timestamp.
    pub modified: DateTime<Utc>,
    /// Inclusion flag written by the filter phase.
    pub active: bool,
}

impl FileDescriptor {
    pub fn new(
        original_name: impl Into<String>,
        doc_type: impl Into<String>,
        size: u64,
        modified: DateTime<Utc>,
    ) -> Self {
        let original_name = original_name.into();
        Self {
            current_name: original_name.clone(),
            original_name,
            doc_type: doc_type.into(),
            size,
            modified,
            active: true,
        }
    }

    /// Restore the post-construction state so the descriptor set can be
    /// re-run after the rule list changes.
    pub fn reset(&mut self) {
        self.current_name = self.original_name.clone();
        self.active = true;
    }
}
