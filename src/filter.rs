//! File- and line-admission filters.
//!
//! Both filters borrow a [`ChangeQueryService`] and reject by default: a
//! file or finding is only admitted when the diff positively covers it, and
//! nothing is admitted if the index failed to build.

use crate::findings::Finding;
use crate::service::ChangeQueryService;

/// Admits only files that appear in the diff.
#[derive(Debug, Clone, Copy)]
pub struct FileFilter<'a> {
    service: &'a ChangeQueryService,
}

impl<'a> FileFilter<'a> {
    pub fn new(service: &'a ChangeQueryService) -> Self {
        Self { service }
    }

    /// True if `file` should be analyzed.
    pub fn accept(&self, file: &str) -> bool {
        self.service.file_in_index(file)
    }
}

/// Admits only findings reported on changed lines.
#[derive(Debug, Clone, Copy)]
pub struct LineFilter<'a> {
    service: &'a ChangeQueryService,
}

impl<'a> LineFilter<'a> {
    pub fn new(service: &'a ChangeQueryService) -> Self {
        Self { service }
    }

    /// True if `finding` should be reported. Findings without a file are dropped.
    pub fn accept(&self, finding: &Finding) -> bool {
        let Some(file) = finding.file.as_deref() else {
            return false;
        };
        self.service.line_changed(file, finding.line)
    }
}
