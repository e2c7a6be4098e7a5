//! The query surface used by filters.
//!
//! [`ChangeQueryService`] owns a diff source and a path resolver, builds the
//! [`ChangeSetIndex`] on first use, and answers "is this file in the diff?"
//! and "was this line changed?".
//!
//! # Build-once semantics
//!
//! The index lives in a [`OnceLock`]: concurrent first queries trigger a
//! single build and the rest wait for it. A failed build is cached too, so
//! the failure is logged once and every later query answers `false`.
//! Resetting requires `&mut self`, which rules out readers during a reset.

use crate::diff::parse_diff_lines;
use crate::error::Result;
use crate::index::ChangeSetIndex;
use crate::path::PathResolver;
use crate::source::DiffSource;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::{debug, error, info};

/// Settings for a [`ChangeQueryService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Directory relative diff and query names are joined onto.
    pub base_dir: PathBuf,
    /// Where the diff comes from.
    pub source: DiffSource,
    /// Log each query and the built index at debug level.
    pub debug: bool,
}

/// Lazily-built changed-line index with file- and line-level queries.
#[derive(Debug)]
pub struct ChangeQueryService {
    resolver: PathResolver,
    source: DiffSource,
    debug: bool,
    index: OnceLock<Result<ChangeSetIndex>>,
}

impl ChangeQueryService {
    /// Create a service; nothing is read until the first query or [`build`].
    ///
    /// [`build`]: ChangeQueryService::build
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            resolver: PathResolver::new(config.base_dir),
            source: config.source,
            debug: config.debug,
            index: OnceLock::new(),
        }
    }

    /// Resolver shared by indexing and queries.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// The configured diff source.
    pub fn source(&self) -> &DiffSource {
        &self.source
    }

    /// True once a build has been attempted, successful or not.
    pub fn is_built(&self) -> bool {
        self.index.get().is_some()
    }

    /// Build the index if needed and return it, or the build failure.
    pub fn build(&self) -> Result<&ChangeSetIndex> {
        self.index
            .get_or_init(|| self.build_index())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// True iff `name` was mentioned by the diff.
    ///
    /// False for unknown files and when the index failed to build.
    pub fn file_in_index(&self, name: &str) -> bool {
        let key = self.resolver.resolve(name);
        let result = self
            .build()
            .map(|index| index.file_in_index(&key))
            .unwrap_or(false);
        if self.debug {
            debug!(file = %key, result, "file query");
        }
        result
    }

    /// True iff `line` of `name` lies in a changed range.
    ///
    /// False for unknown files and when the index failed to build.
    pub fn line_changed(&self, name: &str, line: u32) -> bool {
        let key = self.resolver.resolve(name);
        let result = self
            .build()
            .map(|index| index.line_changed(&key, line))
            .unwrap_or(false);
        if self.debug {
            debug!(file = %key, line, result, "line query");
        }
        result
    }

    /// Drop the built index; the next query rebuilds it.
    pub fn invalidate(&mut self) {
        if self.index.take().is_some() {
            debug!("changed-line index invalidated");
        }
    }

    /// Drop the built index and build it again now.
    pub fn rebuild(&mut self) -> Result<&ChangeSetIndex> {
        self.invalidate();
        self.build()
    }

    /// Switch to a different diff source, invalidating the index.
    pub fn set_source(&mut self, source: DiffSource) {
        self.source = source;
        self.invalidate();
    }

    /// Switch to a different base directory, invalidating the index.
    pub fn set_base_dir(&mut self, base_dir: impl Into<PathBuf>) {
        self.resolver = PathResolver::new(base_dir);
        self.invalidate();
    }

    fn build_index(&self) -> Result<ChangeSetIndex> {
        info!(
            source = %self.source,
            base_dir = %self.resolver.base_dir().display(),
            "building changed-line index"
        );

        let lines = self
            .source
            .read_lines(self.resolver.base_dir())
            .inspect_err(|e| {
                error!("failed to build changed-line index from {}: {e}", self.source);
            })?;

        let parsed = parse_diff_lines(lines, &self.resolver);
        info!(
            files = parsed.index.len(),
            hunks = parsed.stats.recorded_hunks,
            skipped = parsed.stats.skipped_lines,
            "changed-line index built"
        );

        if self.debug {
            for (file, ranges) in parsed.index.iter() {
                debug!("{file} ==> {ranges}");
            }
        }

        Ok(parsed.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TouchlineError;
    use crate::source::GitDiffSpec;
    use crate::test_support::{create_test_repo_with_remote, git, numbered_lines};
    use std::path::Path;
    use std::thread;
    use tempfile::TempDir;

    const ROUND_TRIP: &str = "+++ b/src/A.java
@@ -10,0 +10,2 @@
+++ b/src/B.java
@@ -5 +5 @@
";

    fn inline_service(diff: &str) -> ChangeQueryService {
        ChangeQueryService::new(ServiceConfig {
            base_dir: PathBuf::from("/repo"),
            source: DiffSource::Inline(diff.to_string()),
            debug: false,
        })
    }

    fn file_service(path: &Path) -> ChangeQueryService {
        ChangeQueryService::new(ServiceConfig {
            base_dir: PathBuf::from("/repo"),
            source: DiffSource::File(path.to_path_buf()),
            debug: true,
        })
    }

    #[test]
    fn round_trip_queries() {
        let service = inline_service(ROUND_TRIP);

        assert!(service.file_in_index("src/A.java"));
        assert!(service.line_changed("src/A.java", 10));
        assert!(service.line_changed("src/A.java", 11));
        assert!(!service.line_changed("src/A.java", 9));

        assert!(service.file_in_index("src/B.java"));
        assert!(service.line_changed("src/B.java", 5));
        assert!(!service.line_changed("src/B.java", 6));
    }

    #[test]
    fn deletion_only_file_is_in_index_without_lines() {
        let service = inline_service("+++ b/src/C.java\n@@ -3,2 +3,0 @@\n");

        assert!(service.file_in_index("src/C.java"));
        for line in 1..=10 {
            assert!(!service.line_changed("src/C.java", line));
        }
    }

    #[test]
    fn absolute_and_relative_queries_agree() {
        let service = inline_service(ROUND_TRIP);

        assert!(service.file_in_index("/repo/src/A.java"));
        assert!(service.line_changed("/repo/src/A.java", 10));
        assert!(service.line_changed("/repo/./src/../src/A.java", 11));
        assert!(!service.file_in_index("/elsewhere/src/A.java"));
    }

    #[test]
    fn unknown_file_is_unchanged() {
        let service = inline_service(ROUND_TRIP);
        assert!(!service.file_in_index("src/Unknown.java"));
        assert!(!service.line_changed("src/Unknown.java", 10));
    }

    #[test]
    fn build_is_lazy() {
        let temp_dir = TempDir::new().unwrap();
        let diff = temp_dir.path().join("changes.diff");
        let service = file_service(&diff);

        // The file does not exist yet; construction must not read it.
        std::fs::write(&diff, ROUND_TRIP).unwrap();
        assert!(!service.is_built());
        assert!(service.line_changed("src/A.java", 10));
        assert!(service.is_built());
    }

    #[test]
    fn index_is_built_once() {
        let temp_dir = TempDir::new().unwrap();
        let diff = temp_dir.path().join("changes.diff");
        std::fs::write(&diff, ROUND_TRIP).unwrap();
        let service = file_service(&diff);

        assert!(service.file_in_index("src/A.java"));
        std::fs::remove_file(&diff).unwrap();

        // A rebuild would now fail; the cached index keeps answering.
        assert!(service.line_changed("src/A.java", 10));
        assert!(service.build().is_ok());
    }

    #[test]
    fn concurrent_first_queries_share_one_build() {
        let temp_dir = TempDir::new().unwrap();
        let diff = temp_dir.path().join("changes.diff");
        std::fs::write(&diff, ROUND_TRIP).unwrap();
        let service = file_service(&diff);

        thread::scope(|scope| {
            let handles: Vec<_> = (0..8).map(|_| scope.spawn(|| service.build())).collect();
            let indexes: Vec<&ChangeSetIndex> = handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect();
            assert!(indexes.windows(2).all(|w| std::ptr::eq(w[0], w[1])));
        });

        std::fs::remove_file(&diff).unwrap();
        assert!(service.line_changed("src/B.java", 5));
    }

    #[test]
    fn failed_build_rejects_everything() {
        let temp_dir = TempDir::new().unwrap();
        let service = file_service(&temp_dir.path().join("missing.diff"));

        assert!(!service.file_in_index("src/A.java"));
        assert!(!service.line_changed("src/A.java", 10));

        let err = service.build().unwrap_err();
        assert!(matches!(err, TouchlineError::DiffSourceError(_)));
        assert!(service.is_built());
    }

    #[test]
    fn failed_build_is_not_retried_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let diff = temp_dir.path().join("late.diff");
        let mut service = file_service(&diff);

        assert!(service.build().is_err());
        std::fs::write(&diff, ROUND_TRIP).unwrap();
        assert!(service.build().is_err());

        assert!(service.rebuild().is_ok());
        assert!(service.line_changed("src/A.java", 10));
    }

    #[test]
    fn set_source_invalidates() {
        let mut service = inline_service(ROUND_TRIP);
        assert!(service.line_changed("src/A.java", 10));

        service.set_source(DiffSource::Inline("+++ b/src/Z.java\n@@ -1 +1 @@\n".to_string()));
        assert!(!service.is_built());
        assert!(!service.file_in_index("src/A.java"));
        assert!(service.line_changed("src/Z.java", 1));
    }

    #[test]
    fn set_base_dir_rekeys_index() {
        let mut service = inline_service(ROUND_TRIP);
        assert!(service.file_in_index("/repo/src/A.java"));

        service.set_base_dir("/other");
        assert!(!service.file_in_index("/repo/src/A.java"));
        assert!(service.file_in_index("/other/src/A.java"));
    }

    #[test]
    fn invalidate_on_unbuilt_service_is_harmless() {
        let mut service = inline_service(ROUND_TRIP);
        service.invalidate();
        assert!(!service.is_built());
        assert!(service.file_in_index("src/B.java"));
    }

    #[test]
    fn git_source_against_origin_main() {
        let temp_dir = create_test_repo_with_remote();
        let path = temp_dir.path();

        git(path, &["checkout", "-b", "feature"]);
        // Replace lines 4-5, delete line 8, add a new file.
        let mut lines: Vec<String> = numbered_lines(1..=10).lines().map(String::from).collect();
        lines[3] = "changed 4".to_string();
        lines[4] = "changed 5".to_string();
        lines.remove(7);
        std::fs::write(path.join("src/lib.rs"), lines.join("\n") + "\n").unwrap();
        std::fs::write(path.join("src/new.rs"), "fn new() {}\n").unwrap();
        git(path, &["add", "."]);
        git(path, &["commit", "-m", "Feature"]);

        let service = ChangeQueryService::new(ServiceConfig {
            base_dir: path.to_path_buf(),
            source: DiffSource::Git(GitDiffSpec::default()),
            debug: false,
        });

        assert!(service.file_in_index("src/lib.rs"));
        assert!(!service.line_changed("src/lib.rs", 3));
        assert!(service.line_changed("src/lib.rs", 4));
        assert!(service.line_changed("src/lib.rs", 5));
        assert!(!service.line_changed("src/lib.rs", 6));
        assert!(!service.line_changed("src/lib.rs", 8));
        assert!(service.line_changed(&path.join("src/new.rs").to_string_lossy(), 1));
        assert!(!service.file_in_index("README.md"));
    }

    #[test]
    fn git_failure_surfaces_as_build_error() {
        let temp_dir = TempDir::new().unwrap();
        let service = ChangeQueryService::new(ServiceConfig {
            base_dir: temp_dir.path().to_path_buf(),
            source: DiffSource::Git(GitDiffSpec::default()),
            debug: false,
        });

        assert!(matches!(service.build(), Err(TouchlineError::GitError(_))));
        assert!(!service.file_in_index("anything.rs"));
    }

    #[test]
    fn service_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChangeQueryService>();
    }
}
