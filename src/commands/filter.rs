//! `filter`: drop findings on unchanged lines.

use super::{emit, write_error};
use crate::cli::FilterArgs;
use crate::error::{Result, TouchlineError};
use crate::exit_codes;
use crate::filter::LineFilter;
use crate::findings::parse_finding;
use crate::service::ChangeQueryService;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::info;

/// Copy findings on changed lines from the input to `out`.
///
/// Stdin can feed the diff or the findings, not both.
pub fn cmd_filter(
    service: &ChangeQueryService,
    args: &FilterArgs,
    out: &mut impl Write,
) -> Result<i32> {
    if args.input.is_none() && service.source().reads_stdin() {
        return Err(TouchlineError::UserError(
            "the diff and the findings cannot both be read from stdin\n\n\
             Fix: pass the findings with --input FILE, or the diff with --diff-file FILE."
                .to_string(),
        ));
    }

    // Read a piped diff before stdin is locked for findings.
    service.build()?;

    match &args.input {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                TouchlineError::UserError(format!(
                    "failed to open findings file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
            filter_findings(service, BufReader::new(file), args.keep_unparsed, out)
        }
        None => filter_findings(service, io::stdin().lock(), args.keep_unparsed, out),
    }
}

fn filter_findings<R: BufRead>(
    service: &ChangeQueryService,
    input: R,
    keep_unparsed: bool,
    out: &mut impl Write,
) -> Result<i32> {
    // Fail before consuming input if the index cannot be built.
    service.build()?;
    let filter = LineFilter::new(service);

    let (mut kept, mut dropped, mut unparsed) = (0usize, 0usize, 0usize);
    for line in input.lines() {
        let line = line.map_err(|e| {
            TouchlineError::UserError(format!("failed to read findings: {e}"))
        })?;

        match parse_finding(&line) {
            Some(finding) if filter.accept(&finding) => {
                kept += 1;
                emit(out, &line)?;
            }
            Some(_) => dropped += 1,
            None => {
                unparsed += 1;
                if keep_unparsed {
                    emit(out, &line)?;
                }
            }
        }
    }
    out.flush().map_err(write_error)?;

    info!(kept, dropped, unparsed, "filtered findings");
    Ok(exit_codes::SUCCESS)
}
