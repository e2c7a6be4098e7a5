//! Unified diff parsing for touchline.
//!
//! Turns the output of `git diff -U0 <base>` into a [`ChangeSetIndex`]:
//! - `+++ b/<path>` headers open a file entry (get-or-create)
//! - `@@ ... +start[,len] @@` headers add `[start, start + len - 1]`
//! - pure deletions (`len == 0`) add nothing
//! - malformed hunk headers are skipped, never fatal
//!
//! [`ChangeSetIndex`]: crate::index::ChangeSetIndex

mod api;
mod helpers;
mod parser;


// Re-export public API
pub use api::{DiffParseError, ParseStats, ParsedDiff};
pub use helpers::is_relevant_diff_line;
pub use parser::{DiffParser, parse_diff, parse_diff_lines};
