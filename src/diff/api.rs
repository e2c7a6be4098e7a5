//! Public types produced by the diff parser.

use crate::index::ChangeSetIndex;
use thiserror::Error;

/// A single diff line the parser could not use.
///
/// These never abort a parse; they are logged and counted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffParseError {
    /// A `@@` line whose ranges could not be read.
    #[error("malformed hunk header: {0}")]
    MalformedHunkHeader(String),

    /// A `+++ b/` line with no path after the prefix.
    #[error("file header without a path: {0}")]
    EmptyFileHeader(String),
}

/// Counters describing one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// `+++ b/<path>` headers seen.
    pub file_headers: usize,
    /// Hunks that recorded a range.
    pub recorded_hunks: usize,
    /// Hunks with a zero-length new side.
    pub deletion_hunks: usize,
    /// Hunk headers seen before any file header.
    pub orphan_hunks: usize,
    /// Lines skipped as malformed.
    pub skipped_lines: usize,
}

/// Result of parsing a diff: the index plus what the parser saw.
#[derive(Debug, Clone, Default)]
pub struct ParsedDiff {
    /// Changed ranges per file.
    pub index: ChangeSetIndex,
    /// Parse counters.
    pub stats: ParseStats,
}
