//! CLI argument parsing for touchline.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Touchline: which lines did this branch change?
///
/// Builds an index of changed lines from `git diff -U0` output (or a saved
/// diff file) and answers file- and line-level queries against it, so
/// analysis findings on untouched code can be suppressed.
#[derive(Parser, Debug)]
#[command(name = "touchline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command. Each overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: `.touchline.yaml` in the base directory, if present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory diff paths are relative to.
    #[arg(long, global = true, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Read the diff from this file instead of running git (`-` for stdin).
    #[arg(long, global = true, value_name = "FILE")]
    pub diff_file: Option<PathBuf>,

    /// Diff against the merge-base of HEAD and this ref.
    #[arg(long, global = true, value_name = "REF")]
    pub merge_target: Option<String>,

    /// Diff against this revision directly.
    #[arg(long, global = true, value_name = "REV")]
    pub base: Option<String>,

    /// Log progress to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log every query and the built index to stderr.
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands for touchline.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List files present in the diff.
    Files(FilesArgs),

    /// Show the changed line ranges of every file in the diff.
    Ranges(RangesArgs),

    /// Check whether a file, or one of its lines, was changed.
    ///
    /// Exits 0 if changed, 2 if not.
    Check(CheckArgs),

    /// Keep only analysis findings reported on changed lines.
    ///
    /// Reads `path:line[:col]: message` lines (checkstyle's `[WARN] ...`
    /// form included) and prints those whose line was changed.
    Filter(FilterArgs),
}

/// Arguments for the `files` command.
#[derive(Parser, Debug)]
pub struct FilesArgs {
    /// Print a JSON array instead of one path per line.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `ranges` command.
#[derive(Parser, Debug)]
pub struct RangesArgs {
    /// Print a JSON object mapping paths to ranges.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// File to check, relative to the base directory or absolute.
    pub file: String,

    /// Line to check (1-based). Without it, only file membership is checked.
    pub line: Option<u32>,
}

/// Arguments for the `filter` command.
#[derive(Parser, Debug)]
pub struct FilterArgs {
    /// Read findings from this file instead of stdin.
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Pass through lines that are not findings.
    #[arg(long)]
    pub keep_unparsed: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
