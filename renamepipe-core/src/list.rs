use crate::rule::{ConstructionError, Rule, RuleKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

/// Mutation with a bad index. The list is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error("index {index} out of range for rule list of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Stable identity of a list entry.
///
/// Assigned once at insert and never reused within a list's lifetime, so
/// the editor can address an entry across reorders and animated moves.
/// The engine itself keys only off position.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct RuleId(#[ts(type = "number")] u64);

/// A rule paired with its stable identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RuleEntry {
    pub id: RuleId,
    pub rule: Rule,
}

/// The ordered rule pipeline.
///
/// An arena of entries addressed by a monotonically increasing identity
/// counter; execution order is arena iteration order and nothing else.
/// Single-owner: callers serialize edits against batch runs.
#[derive(Debug, Clone, Default)]
pub struct RuleList {
    entries: Vec<RuleEntry>,
    next_id: u64,
}

impl RuleList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate and append a rule, returning its fresh identity.
    pub fn insert(&mut self, rule: Rule) -> Result<RuleId, ConstructionError> {
        rule.validate()?;
        let id = RuleId(self.next_id);
        self.next_id += 1;
        self.entries.push(RuleEntry { id, rule });
        Ok(id)
    }

    /// Remove the entry at `index`, shifting later entries left. The
    /// identities of untouched entries are preserved.
    pub fn delete(&mut self, index: usize) -> Result<Rule, ListError> {
        if index >= self.entries.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries.remove(index).rule)
    }

    /// Swap the entry at `index` with its predecessor. Returns whether a
    /// swap occurred; `index == 0` (or out of range) is a no-op.
    pub fn move_up(&mut self, index: usize) -> bool {
        if index == 0 || index >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index - 1);
        true
    }

    /// Swap the entry at `index` with its successor. Returns whether a
    /// swap occurred; the tail entry (or out of range) is a no-op.
    pub fn move_down(&mut self, index: usize) -> bool {
        if index + 1 >= self.entries.len() {
            return false;
        }
        self.entries.swap(index, index + 1);
        true
    }

    /// Flip the active flag at `index`, returning the new value. Position
    /// and parameters are untouched.
    pub fn toggle_active(&mut self, index: usize) -> Result<bool, ListError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        let value = !entry.rule.is_active();
        entry.rule.set_active(value);
        Ok(value)
    }

    pub fn set_active(&mut self, index: usize, value: bool) -> Result<(), ListError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })?;
        entry.rule.set_active(value);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&RuleEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut RuleEntry> {
        self.entries.get_mut(index)
    }

    pub fn entry_by_id(&self, id: RuleId) -> Option<&RuleEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleEntry> {
        self.entries.iter()
    }

    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.entries.iter().map(|entry| &entry.rule)
    }

    /// Stable-partition the active rules into (filters, transforms), each
    /// preserving its list-relative order. This is the runner's view of
    /// the pipeline: inactive rules simply drop out.
    pub fn partition(&self) -> (Vec<&Rule>, Vec<&Rule>) {
        let mut filters = Vec::new();
        let mut transforms = Vec::new();
        for rule in self.rules() {
            if !rule.is_active() {
                continue;
            }
            match rule.kind() {
                RuleKind::Filter => filters.push(rule),
                RuleKind::Transform => transforms.push(rule),
            }
        }
        (filters, transforms)
    }
}

impl<'a> IntoIterator for &'a RuleList {
    type Item = &'a RuleEntry;
    type IntoIter = std::slice::Iter<'a, RuleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
