//! Helper functions for diff header parsing.

use super::api::DiffParseError;

/// The new-file side of a hunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct HunkHeader {
    pub new_start: u32,
    pub new_len: u32,
}

/// What a `+++ ` line names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FileHeader<'a> {
    /// `+++ b/<path>`
    New(&'a str),
    /// `+++ /dev/null`: the file was deleted.
    Removed,
}

/// True for the only lines the parser acts on: `+++` and `@@` headers.
///
/// Sources use this to drop hunk bodies before buffering.
pub fn is_relevant_diff_line(line: &str) -> bool {
    line.starts_with("+++") || line.starts_with("@@")
}

/// Parse a `+++ ` file header line.
///
/// Returns `None` for lines that are not file headers, or for `+++ ` lines
/// in a form the parser ignores (e.g. `--no-prefix` output).
pub(super) fn parse_file_header(line: &str) -> Option<Result<FileHeader<'_>, DiffParseError>> {
    let rest = line.strip_prefix("+++ ")?;
    if rest == "/dev/null" {
        return Some(Ok(FileHeader::Removed));
    }
    let path = rest.strip_prefix("b/")?;
    // git appends a tab after names that contain spaces
    let path = path.strip_suffix('\t').unwrap_or(path);
    if path.is_empty() {
        return Some(Err(DiffParseError::EmptyFileHeader(line.to_string())));
    }
    Some(Ok(FileHeader::New(path)))
}

/// True if `line` should be treated as a hunk header.
pub(super) fn is_hunk_header(line: &str) -> bool {
    line.starts_with("@@ ")
}

/// Parse a hunk header line.
///
/// Format: "@@ -old_start[,old_len] +new_start[,new_len] @@ optional context"
///
/// The old side must be present but is not interpreted. An omitted new
/// length means one line. A non-zero length starting at line 0 is rejected.
pub(super) fn parse_hunk_header(line: &str) -> Result<HunkHeader, DiffParseError> {
    let malformed = || DiffParseError::MalformedHunkHeader(line.to_string());

    let rest = line.strip_prefix("@@ ").ok_or_else(malformed)?;
    let end = rest.find(" @@").ok_or_else(malformed)?;

    let mut parts = rest[..end].split(' ');
    let old = parts
        .next()
        .and_then(|p| p.strip_prefix('-'))
        .ok_or_else(malformed)?;
    let new = parts
        .next()
        .and_then(|p| p.strip_prefix('+'))
        .ok_or_else(malformed)?;
    if old.is_empty() || parts.next().is_some() {
        return Err(malformed());
    }

    let (new_start, new_len) = parse_range(new).ok_or_else(malformed)?;
    if new_start == 0 && new_len > 0 {
        return Err(malformed());
    }

    Ok(HunkHeader { new_start, new_len })
}

/// Parse "start" or "start,len" into `(start, len)`, defaulting `len` to 1.
fn parse_range(range: &str) -> Option<(u32, u32)> {
    match range.split_once(',') {
        Some((start, len)) => Some((parse_number(start)?, parse_number(len)?)),
        None => Some((parse_number(range)?, 1)),
    }
}

/// Parse a plain run of ASCII digits.
///
/// `str::parse` would also accept a leading `+`, which is never valid here.
fn parse_number(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
