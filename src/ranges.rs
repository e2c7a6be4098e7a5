//! Disjoint line-range sets.
//!
//! A [`RangeSet`] keeps its ranges sorted by start and merged, so that no two
//! stored ranges overlap or touch. Containment is a binary search.

use serde::Serialize;
use std::fmt;

/// A closed interval of 1-based line numbers in the new version of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineRange {
    from: u32,
    to: u32,
}

impl LineRange {
    /// Create the range `[from, to]`.
    ///
    /// Returns `None` when `from` is 0 or `to < from`.
    pub fn new(from: u32, to: u32) -> Option<Self> {
        if from == 0 || to < from {
            return None;
        }
        Some(Self { from, to })
    }

    /// Create the range covering `len` lines starting at `start`.
    ///
    /// Returns `None` for an empty hunk (`len == 0`), for `start == 0`, or
    /// when the end would overflow.
    pub fn from_start_len(start: u32, len: u32) -> Option<Self> {
        if len == 0 {
            return None;
        }
        let to = start.checked_add(len - 1)?;
        Self::new(start, to)
    }

    /// First line of the range.
    pub fn from(&self) -> u32 {
        self.from
    }

    /// Last line of the range.
    pub fn to(&self) -> u32 {
        self.to
    }

    /// Number of lines covered.
    pub fn len(&self) -> u32 {
        self.to - self.from + 1
    }

    /// Always false; ranges cover at least one line.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True if `line` lies within the range.
    pub fn contains(&self, line: u32) -> bool {
        self.from <= line && line <= self.to
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "{}", self.from)
        } else {
            write!(f, "{}-{}", self.from, self.to)
        }
    }
}

/// Set of changed lines for one file, stored as merged ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RangeSet {
    ranges: Vec<LineRange>,
}

impl RangeSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `range`, merging it with every stored range it overlaps or touches.
    pub fn insert(&mut self, range: LineRange) {
        // First stored range that could merge: its end reaches `range.from - 1`.
        let lo = self
            .ranges
            .partition_point(|r| r.to.saturating_add(1) < range.from);
        // One past the last stored range whose start is at most `range.to + 1`.
        let hi = self
            .ranges
            .partition_point(|r| r.from <= range.to.saturating_add(1));

        if lo == hi {
            self.ranges.insert(lo, range);
            return;
        }

        let merged = LineRange {
            from: range.from.min(self.ranges[lo].from),
            to: range.to.max(self.ranges[hi - 1].to),
        };
        self.ranges.splice(lo..hi, std::iter::once(merged));
    }

    /// True if `line` falls in some stored range.
    pub fn contains(&self, line: u32) -> bool {
        let idx = self.ranges.partition_point(|r| r.to < line);
        self.ranges.get(idx).is_some_and(|r| r.contains(line))
    }

    /// Stored ranges in ascending order.
    pub fn ranges(&self) -> &[LineRange] {
        &self.ranges
    }

    /// Number of disjoint ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// True if no line is marked.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of lines covered.
    pub fn line_count(&self) -> u64 {
        self.ranges.iter().map(|r| u64::from(r.len())).sum()
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(ToString::to_string).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
