//! The changed-line index built from a diff.

use crate::path::PathKey;
use crate::ranges::{LineRange, RangeSet};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mapping from path key to the lines changed in that file.
///
/// A file without an entry was not touched by the diff. A file with an empty
/// [`RangeSet`] was touched, but only by deletions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChangeSetIndex {
    files: BTreeMap<PathKey, RangeSet>,
}

impl ChangeSetIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the range set for `key`.
    ///
    /// An existing entry is never replaced, so a file appearing twice in a
    /// diff keeps the ranges recorded under its first header.
    pub fn entry(&mut self, key: PathKey) -> &mut RangeSet {
        self.files.entry(key).or_default()
    }

    /// Record `range` as changed in `key`, creating the entry if needed.
    pub fn insert(&mut self, key: PathKey, range: LineRange) {
        self.entry(key).insert(range);
    }

    /// True iff the diff mentioned `key`, even with no surviving hunk.
    pub fn file_in_index(&self, key: &PathKey) -> bool {
        self.files.contains_key(key)
    }

    /// True iff `line` of `key` lies in a changed range.
    ///
    /// Unknown files have no changed lines.
    pub fn line_changed(&self, key: &PathKey, line: u32) -> bool {
        self.files.get(key).is_some_and(|set| set.contains(line))
    }

    /// Changed ranges of `key`, if the file is in the index.
    pub fn ranges(&self, key: &PathKey) -> Option<&RangeSet> {
        self.files.get(key)
    }

    /// Indexed files in ascending key order.
    pub fn files(&self) -> impl Iterator<Item = &PathKey> {
        self.files.keys()
    }

    /// Indexed files with their range sets, in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathKey, &RangeSet)> {
        self.files.iter()
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True if the diff mentioned no file at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
