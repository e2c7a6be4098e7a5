//! Exit code constants for the touchline CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config)
//! - 2: Queried file or line is not part of the diff
//! - 3: Git operation failure
//! - 4: Diff source unavailable

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments or an invalid configuration file.
pub const USER_ERROR: i32 = 1;

/// `check` found the file or line unchanged.
pub const NOT_CHANGED: i32 = 2;

/// Git operation failure: merge-base lookup or diff invocation failed.
pub const GIT_FAILURE: i32 = 3;

/// The diff file could not be read.
pub const DIFF_SOURCE_FAILURE: i32 = 4;
