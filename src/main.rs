//! Touchline: which lines did this branch change?
//!
//! This is the main entry point for the `touchline` CLI. It parses arguments,
//! loads configuration, dispatches to the appropriate command handler, and
//! handles errors with proper exit codes.

use std::process::ExitCode;
use touchline::cli::Cli;
use touchline::commands;
use touchline::error::{Result, TouchlineError};
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(cli) {
        Ok(code) => ExitCode::from(code as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let cwd = std::env::current_dir().map_err(|e| {
        TouchlineError::UserError(format!("failed to get current directory: {}", e))
    })?;

    let config = commands::load_config(&cli.global, &cwd)?;
    init_logging(cli.global.verbose, config.debug);

    commands::dispatch(cli.command, &config, &cwd)
}

fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    // RUST_LOG wins over the flags.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    debug!("Logging initialized at level: {}", level);
}
