//! `check`: query one file or line.

use super::emit;
use crate::cli::CheckArgs;
use crate::error::Result;
use crate::exit_codes;
use crate::service::ChangeQueryService;
use std::io::Write;

/// Report whether a file (or a line of it) was changed.
///
/// Exits with `NOT_CHANGED` rather than an error when it was not.
pub fn cmd_check(
    service: &ChangeQueryService,
    args: &CheckArgs,
    out: &mut impl Write,
) -> Result<i32> {
    // Surface a broken source instead of reporting "not changed".
    service.build()?;

    let (changed, subject) = match args.line {
        Some(line) => (
            service.line_changed(&args.file, line),
            format!("{}:{}", args.file, line),
        ),
        None => (service.file_in_index(&args.file), args.file.clone()),
    };

    if changed {
        emit(out, format_args!("{subject}: changed"))?;
        Ok(exit_codes::SUCCESS)
    } else {
        emit(out, format_args!("{subject}: not changed"))?;
        Ok(exit_codes::NOT_CHANGED)
    }
}
