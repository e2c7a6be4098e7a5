//! Core diff parsing logic.

use crate::index::ChangeSetIndex;
use crate::path::{PathKey, PathResolver};
use crate::ranges::LineRange;
use tracing::{debug, warn};

use super::api::{DiffParseError, ParseStats, ParsedDiff};
use super::helpers::{FileHeader, is_hunk_header, parse_file_header, parse_hunk_header};

/// Incremental parser over the lines of a `git diff -U0` stream.
///
/// Feed lines in order with [`DiffParser::feed`], then call
/// [`DiffParser::finish`]. A parser is single-use; to parse again, make a
/// new one.
#[derive(Debug)]
pub struct DiffParser<'r> {
    resolver: &'r PathResolver,
    index: ChangeSetIndex,
    stats: ParseStats,
    current_file: Option<PathKey>,
    line_no: usize,
}

impl<'r> DiffParser<'r> {
    /// Create a parser that keys files through `resolver`.
    pub fn new(resolver: &'r PathResolver) -> Self {
        Self {
            resolver,
            index: ChangeSetIndex::new(),
            stats: ParseStats::default(),
            current_file: None,
            line_no: 0,
        }
    }

    /// Process one diff line.
    pub fn feed(&mut self, line: &str) {
        self.line_no += 1;

        if let Some(header) = parse_file_header(line) {
            match header {
                Ok(FileHeader::New(path)) => {
                    let key = self.resolver.resolve(path);
                    self.index.entry(key.clone());
                    self.current_file = Some(key);
                    self.stats.file_headers += 1;
                }
                Ok(FileHeader::Removed) => {
                    self.current_file = None;
                }
                Err(err) => {
                    self.current_file = None;
                    self.skip(err);
                }
            }
            return;
        }

        if is_hunk_header(line) {
            match parse_hunk_header(line) {
                Ok(hunk) => self.record_hunk(hunk.new_start, hunk.new_len),
                Err(err) => self.skip(err),
            }
        }
    }

    /// Consume the parser and return the index built so far.
    pub fn finish(self) -> ParsedDiff {
        debug!(
            files = self.index.len(),
            recorded_hunks = self.stats.recorded_hunks,
            deletion_hunks = self.stats.deletion_hunks,
            skipped_lines = self.stats.skipped_lines,
            "parsed diff"
        );
        ParsedDiff {
            index: self.index,
            stats: self.stats,
        }
    }

    fn record_hunk(&mut self, new_start: u32, new_len: u32) {
        let Some(file) = &self.current_file else {
            self.stats.orphan_hunks += 1;
            return;
        };

        // Pure deletions leave nothing in the new file to touch.
        if new_len == 0 {
            self.stats.deletion_hunks += 1;
            return;
        }

        match LineRange::from_start_len(new_start, new_len) {
            Some(range) => {
                self.index.insert(file.clone(), range);
                self.stats.recorded_hunks += 1;
            }
            None => self.skip(DiffParseError::MalformedHunkHeader(format!(
                "+{new_start},{new_len} overflows"
            ))),
        }
    }

    fn skip(&mut self, err: DiffParseError) {
        warn!(line = self.line_no, "skipping diff line: {err}");
        self.stats.skipped_lines += 1;
    }
}

/// Parse a sequence of diff lines into a changed-line index.
///
/// Lines are consumed lazily; nothing beyond the current line is held apart
/// from the index itself.
pub fn parse_diff_lines<I, S>(lines: I, resolver: &PathResolver) -> ParsedDiff
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = DiffParser::new(resolver);
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}

/// Parse raw diff output into a changed-line index.
pub fn parse_diff(diff_output: &str, resolver: &PathResolver) -> ParsedDiff {
    parse_diff_lines(diff_output.lines(), resolver)
}
