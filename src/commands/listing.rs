//! `files` and `ranges`: dump the index.

use super::{display_path, emit, write_error};
use crate::cli::{FilesArgs, RangesArgs};
use crate::error::Result;
use crate::exit_codes;
use crate::service::ChangeQueryService;
use std::collections::BTreeMap;
use std::io::Write;

/// List files present in the diff.
pub fn cmd_files(
    service: &ChangeQueryService,
    args: &FilesArgs,
    out: &mut impl Write,
) -> Result<i32> {
    let index = service.build()?;
    let paths: Vec<String> = index
        .files()
        .map(|key| display_path(service, key).into_owned())
        .collect();

    if args.json {
        serde_json::to_writer_pretty(&mut *out, &paths).map_err(|e| write_error(e.into()))?;
        emit(out, "")?;
    } else {
        for path in &paths {
            emit(out, path)?;
        }
    }
    Ok(exit_codes::SUCCESS)
}

/// Show every file with its changed ranges.
pub fn cmd_ranges(
    service: &ChangeQueryService,
    args: &RangesArgs,
    out: &mut impl Write,
) -> Result<i32> {
    let index = service.build()?;

    if args.json {
        let by_path: BTreeMap<String, _> = index
            .iter()
            .map(|(key, ranges)| (display_path(service, key).into_owned(), ranges))
            .collect();
        serde_json::to_writer_pretty(&mut *out, &by_path).map_err(|e| write_error(e.into()))?;
        emit(out, "")?;
    } else {
        for (key, ranges) in index.iter() {
            emit(out, format_args!("{}: {}", display_path(service, key), ranges))?;
        }
    }
    Ok(exit_codes::SUCCESS)
}
