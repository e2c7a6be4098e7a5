//! Config struct definition.

use crate::source::DEFAULT_MERGE_TARGET;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Config file looked up in the base directory when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = ".touchline.yaml";

/// Configuration for touchline.
///
/// Every field can be overridden from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory diff paths are relative to (default: working directory).
    /// A relative value is taken relative to the working directory.
    pub base_dir: Option<PathBuf>,

    /// Pre-generated `git diff -U0` output. `-` reads stdin.
    /// When unset, git is run in `base_dir`.
    pub diff_file: Option<PathBuf>,

    /// Ref whose merge-base with `HEAD` is diffed against (default: "origin/main").
    #[serde(default = "default_merge_target")]
    pub merge_target: String,

    /// Explicit base revision; skips the merge-base lookup.
    pub base: Option<String>,

    /// Extra `git diff` arguments, split with shell quoting rules.
    pub diff_args: String,

    /// Log every query and the built index.
    pub debug: bool,
}

fn default_merge_target() -> String {
    DEFAULT_MERGE_TARGET.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            diff_file: None,
            merge_target: default_merge_target(),
            base: None,
            diff_args: String::new(),
            debug: false,
        }
    }
}
