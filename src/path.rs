//! Path key resolution.
//!
//! Diff headers report repository-relative names (`src/A.java`) while
//! analysis tools usually report absolute ones. Both are anchored at the same
//! base directory and lexically cleaned so they meet at an identical key.

use path_clean::PathClean;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Normalized identifier for a source file, used as the index key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PathKey(PathBuf);

impl PathKey {
    /// Borrow the underlying path.
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for PathKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// Resolves raw filenames against a base directory.
///
/// `resolve` never touches the filesystem: no symlink resolution and no
/// existence checks, only joining and cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    base_dir: PathBuf,
}

impl PathResolver {
    /// Create a resolver anchored at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into().clean(),
        }
    }

    /// Create a resolver anchored at the process working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The base directory relative names are joined onto.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve `raw_name` to its path key.
    ///
    /// Absolute names are only cleaned; relative names are joined onto the
    /// base directory first. Backslashes are treated as separators.
    pub fn resolve(&self, raw_name: &str) -> PathKey {
        let raw = Path::new(raw_name);
        let joined = if raw.is_absolute() {
            raw.to_path_buf()
        } else {
            self.base_dir.join(normalize_separators(raw_name))
        };
        PathKey(joined.clean())
    }
}

/// Convert Windows-style separators in a relative name to forward slashes.
fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}
