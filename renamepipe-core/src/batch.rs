use crate::descriptor::FileDescriptor;
use crate::filter::include_file;
use crate::list::RuleList;
use crate::transform::{apply_transforms, RenameContext};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

/// Where a run currently stands. Advisory only: a run is synchronous, so
/// callers observe `Done` (or `Idle` before the first run).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum BatchPhase {
    Idle,
    Filtering,
    Renaming,
    Done,
}

impl Default for BatchPhase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Per-file result of a batch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Resolution {
    /// The file survived filtering; carries its final computed name.
    Renamed(String),
    /// The file was dropped by a filter and keeps its name.
    Excluded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FileOutcome {
    pub original_name: String,
    pub resolution: Resolution,
}

/// Two or more survivors computed the same final name. Reported, never
/// fatal; the caller decides remediation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NameCollision {
    /// The contested final name.
    pub name: String,
    /// Original names of every file mapping to it, in supply order.
    pub original_names: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BatchOutcome {
    /// One entry per input descriptor, in supply order.
    pub files: Vec<FileOutcome>,
    /// Final names contested by more than one survivor, sorted by name.
    pub collisions: Vec<NameCollision>,
}

impl BatchOutcome {
    pub fn renamed_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.resolution, Resolution::Renamed(_)))
            .count()
    }

    pub fn excluded_count(&self) -> usize {
        self.files.len() - self.renamed_count()
    }

    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

/// Orchestrates one batch: stable-partitions the rule list, filters the
/// descriptor set, renames the survivors, then reports collisions.
///
/// Each file is processed independently; nothing here retries or blocks.
#[derive(Debug, Default)]
pub struct BatchRunner {
    phase: BatchPhase,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    /// Run the pipeline over `files` in supply order.
    ///
    /// Descriptors are updated in place (`active`, `current_name`); the
    /// returned outcome is the caller-facing summary of the same data.
    pub fn run(&mut self, rules: &RuleList, files: &mut [FileDescriptor]) -> BatchOutcome {
        let (filters, transforms) = rules.partition();

        self.phase = BatchPhase::Filtering;
        for file in files.iter_mut() {
            file.active = include_file(file, &filters);
        }

        self.phase = BatchPhase::Renaming;
        let mut sequence_index: u64 = 0;
        for file in files.iter_mut() {
            if !file.active {
                continue;
            }
            let ctx = RenameContext {
                modified: file.modified,
                sequence_index,
            };
            file.current_name = apply_transforms(&file.original_name, &transforms, &ctx);
            sequence_index += 1;
        }

        let outcome = collect_outcome(files);
        self.phase = BatchPhase::Done;
        outcome
    }

    /// Parallel variant of [`run`](Self::run) with identical output.
    ///
    /// The filter phase has no cross-file state and fans out directly.
    /// The rename phase depends on the running sequence counter, so each
    /// survivor's sequence index is pre-assigned serially before the
    /// transforms are mapped in parallel.
    pub fn run_parallel(&mut self, rules: &RuleList, files: &mut [FileDescriptor]) -> BatchOutcome {
        let (filters, transforms) = rules.partition();

        self.phase = BatchPhase::Filtering;
        files
            .par_iter_mut()
            .for_each(|file| file.active = include_file(file, &filters));

        self.phase = BatchPhase::Renaming;
        let mut sequence_index: u64 = 0;
        let assigned: Vec<Option<u64>> = files
            .iter()
            .map(|file| {
                if file.active {
                    let index = sequence_index;
                    sequence_index += 1;
                    Some(index)
                } else {
                    None
                }
            })
            .collect();

        files
            .par_iter_mut()
            .zip(assigned.par_iter())
            .for_each(|(file, index)| {
                if let Some(sequence_index) = *index {
                    let ctx = RenameContext {
                        modified: file.modified,
                        sequence_index,
                    };
                    file.current_name =
                        apply_transforms(&file.original_name, &transforms, &ctx);
                }
            });

        let outcome = collect_outcome(files);
        self.phase = BatchPhase::Done;
        outcome
    }
}

/// Convenience wrapper around a one-shot [`BatchRunner::run`].
pub fn run_batch(rules: &RuleList, files: &mut [FileDescriptor]) -> BatchOutcome {
    BatchRunner::new().run(rules, files)
}

/// Convenience wrapper around a one-shot [`BatchRunner::run_parallel`].
pub fn run_batch_parallel(rules: &RuleList, files: &mut [FileDescriptor]) -> BatchOutcome {
    BatchRunner::new().run_parallel(rules, files)
}

fn collect_outcome(files: &[FileDescriptor]) -> BatchOutcome {
    let outcomes = files
        .iter()
        .map(|file| FileOutcome {
            original_name: file.original_name.clone(),
            resolution: if file.active {
                Resolution::Renamed(file.current_name.clone())
            } else {
                Resolution::Excluded
            },
        })
        .collect();

    // Group survivors by final name; BTreeMap keeps the report order
    // deterministic. Members stay in supply order within a group.
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for file in files.iter().filter(|f| f.active) {
        groups
            .entry(file.current_name.as_str())
            .or_default()
            .push(file.original_name.as_str());
    }
    let collisions = groups
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(name, members)| NameCollision {
            name: name.to_string(),
            original_names: members.iter().map(ToString::to_string).collect(),
        })
        .collect();

    BatchOutcome {
        files: outcomes,
        collisions,
    }
}
