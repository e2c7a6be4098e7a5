//! Touchline: an index of the lines a branch changed.
//!
//! A unified diff (normally `git diff -U0` against the merge-base of `HEAD`
//! and a target ref) is parsed once into a [`ChangeSetIndex`] mapping each
//! post-change file path to the line ranges added or modified in it. The
//! [`ChangeQueryService`] owns that index and answers two questions:
//!
//! - is this file part of the diff? ([`ChangeQueryService::file_in_index`])
//! - was this line of it changed? ([`ChangeQueryService::line_changed`])
//!
//! Static-analysis drivers use the answers to drop findings on code the
//! change did not touch (see [`filter`]).

pub mod cli;
pub mod commands;
pub mod config;
pub mod diff;
pub mod error;
pub mod exit_codes;
pub mod filter;
pub mod findings;
pub mod git;
pub mod index;
pub mod path;
pub mod ranges;
pub mod service;
pub mod source;

#[cfg(test)]
mod test_support;

pub use error::{Result, TouchlineError};
pub use index::ChangeSetIndex;
pub use service::{ChangeQueryService, ServiceConfig};
pub use source::{DiffSource, GitDiffSpec};
