//! Where diff text comes from.
//!
//! A [`DiffSource`] is chosen once, at configuration time. Reading it yields
//! only the header lines the parser acts on; hunk bodies are dropped while
//! streaming.

use crate::diff::is_relevant_diff_line;
use crate::error::{Result, TouchlineError};
use crate::git::{merge_base, run_git_lines};
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;

/// Diff file name meaning "read standard input".
pub const STDIN_MARKER: &str = "-";

/// Default revision the working tree is compared against.
pub const DEFAULT_MERGE_TARGET: &str = "origin/main";

/// How to invoke git for the diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitDiffSpec {
    /// Ref whose merge-base with `HEAD` is the diff base.
    pub merge_target: String,
    /// Explicit base revision; skips the merge-base lookup.
    pub base: Option<String>,
    /// Extra `git diff` arguments. Options go before the base revision;
    /// anything from `--` on goes after it.
    pub extra_args: Vec<String>,
}

impl Default for GitDiffSpec {
    fn default() -> Self {
        Self {
            merge_target: DEFAULT_MERGE_TARGET.to_string(),
            base: None,
            extra_args: Vec::new(),
        }
    }
}

/// A source of unified diff text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffSource {
    /// A diff file written beforehand (`git diff -U0 $BASE > file`), or
    /// standard input when the path is `-`.
    File(PathBuf),
    /// `git diff -U0` between the working tree and a base revision.
    Git(GitDiffSpec),
    /// Diff text held in memory.
    Inline(String),
}

impl DiffSource {
    /// True when the diff is read from standard input.
    pub fn reads_stdin(&self) -> bool {
        matches!(self, DiffSource::File(path) if path.as_os_str() == STDIN_MARKER)
    }

    /// Read the header lines of the diff.
    ///
    /// `cwd` is the directory git runs in; it is unused by the other
    /// variants. Any failure here means no index can be built.
    pub fn read_lines(&self, cwd: &Path) -> Result<Vec<String>> {
        match self {
            DiffSource::File(_) if self.reads_stdin() => {
                read_relevant_lines(io::stdin().lock()).map_err(|e| {
                    TouchlineError::DiffSourceError(format!("failed to read diff from stdin: {e}"))
                })
            }
            DiffSource::File(path) => {
                let file = File::open(path).map_err(|e| {
                    TouchlineError::DiffSourceError(format!(
                        "failed to open diff file '{}': {}",
                        path.display(),
                        e
                    ))
                })?;
                read_relevant_lines(BufReader::new(file)).map_err(|e| {
                    TouchlineError::DiffSourceError(format!(
                        "failed to read diff file '{}': {}",
                        path.display(),
                        e
                    ))
                })
            }
            DiffSource::Git(spec) => read_git_diff(spec, cwd),
            DiffSource::Inline(text) => Ok(text
                .lines()
                .filter(|line| is_relevant_diff_line(line))
                .map(str::to_string)
                .collect()),
        }
    }
}

impl fmt::Display for DiffSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffSource::File(_) if self.reads_stdin() => write!(f, "stdin"),
            DiffSource::File(path) => write!(f, "file {}", path.display()),
            DiffSource::Git(spec) => match &spec.base {
                Some(base) => write!(f, "git diff against {base}"),
                None => write!(f, "git diff against merge-base with {}", spec.merge_target),
            },
            DiffSource::Inline(_) => write!(f, "inline diff"),
        }
    }
}

fn read_git_diff(spec: &GitDiffSpec, cwd: &Path) -> Result<Vec<String>> {
    let base = match &spec.base {
        Some(base) => base.clone(),
        None => {
            let base = merge_base(cwd, &spec.merge_target)?;
            info!(merge_target = %spec.merge_target, %base, "resolved merge-base");
            base
        }
    };

    // Pin the output format against user config (color, prefixes, external tools).
    let mut args: Vec<&str> = vec![
        "diff",
        "-U0",
        "--no-color",
        "--no-ext-diff",
        "--src-prefix=a/",
        "--dst-prefix=b/",
    ];
    // Pathspecs after `--` must follow the base revision.
    let (options, pathspecs) = split_pathspecs(&spec.extra_args);
    args.extend(options.iter().map(String::as_str));
    args.push(&base);
    args.extend(pathspecs.iter().map(String::as_str));

    run_git_lines(cwd, &args, is_relevant_diff_line)
}

/// Split user diff arguments into options and the `--` pathspec tail.
fn split_pathspecs(args: &[String]) -> (&[String], &[String]) {
    match args.iter().position(|arg| arg == "--") {
        Some(at) => args.split_at(at),
        None => (args, &[]),
    }
}

/// Collect the header lines of a diff stream, tolerating invalid UTF-8.
fn read_relevant_lines<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    for line in reader.split(b'\n') {
        let bytes = line?;
        let text = String::from_utf8_lossy(&bytes);
        let text = text.strip_suffix('\r').unwrap_or(&text);
        if is_relevant_diff_line(text) {
            lines.push(text.to_string());
        }
    }
    Ok(lines)
}
