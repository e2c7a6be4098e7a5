//! Command implementations for touchline.
//!
//! This module loads the configuration, builds the query service and routes
//! CLI commands to their implementations. Commands write to a caller-supplied
//! writer and return the process exit code.

mod check;
mod filter;
mod listing;

use crate::cli::{Command, GlobalArgs};
use crate::config::Config;
use crate::error::{Result, TouchlineError};
use crate::path::PathKey;
use crate::service::ChangeQueryService;
use std::io::Write;
use std::path::Path;

pub use check::cmd_check;
pub use filter::cmd_filter;
pub use listing::{cmd_files, cmd_ranges};

/// Load the config file and apply command-line overrides.
///
/// `--config` wins; otherwise `.touchline.yaml` is looked up in the base
/// directory (from `--base-dir`, else `cwd`).
pub fn load_config(global: &GlobalArgs, cwd: &Path) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(cwd.join(path))?,
        None => {
            let dir = global
                .base_dir
                .as_ref()
                .map_or_else(|| cwd.to_path_buf(), |dir| cwd.join(dir));
            Config::discover(dir)?
        }
    };

    if let Some(dir) = &global.base_dir {
        config.base_dir = Some(dir.clone());
    }
    if let Some(file) = &global.diff_file {
        config.diff_file = Some(file.clone());
    }
    if let Some(target) = &global.merge_target {
        config.merge_target = target.clone();
    }
    if let Some(base) = &global.base {
        config.base = Some(base.clone());
    }
    config.debug |= global.debug;

    config.validate()?;
    Ok(config)
}

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command, config: &Config, cwd: &Path) -> Result<i32> {
    let service = ChangeQueryService::new(config.service_config(cwd)?);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Files(args) => cmd_files(&service, &args, &mut out),
        Command::Ranges(args) => cmd_ranges(&service, &args, &mut out),
        Command::Check(args) => cmd_check(&service, &args, &mut out),
        Command::Filter(args) => cmd_filter(&service, &args, &mut out),
    }
}

/// Path shown to the user: relative to the base directory when possible.
fn display_path<'k>(
    service: &ChangeQueryService,
    key: &'k PathKey,
) -> std::borrow::Cow<'k, str> {
    let path = key.as_path();
    path.strip_prefix(service.resolver().base_dir())
        .unwrap_or(path)
        .to_string_lossy()
}

fn write_error(e: std::io::Error) -> TouchlineError {
    TouchlineError::UserError(format!("failed to write output: {e}"))
}

fn emit(out: &mut impl Write, line: impl std::fmt::Display) -> Result<()> {
    writeln!(out, "{line}").map_err(write_error)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn load_config_defaults_without_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(&GlobalArgs::default(), temp_dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_config_discovers_file_in_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(project.join(CONFIG_FILE_NAME), "merge_target: origin/trunk\n").unwrap();

        let global = GlobalArgs {
            base_dir: Some(PathBuf::from("project")),
            ..Default::default()
        };
        let config = load_config(&global, temp_dir.path()).unwrap();
        assert_eq!(config.merge_target, "origin/trunk");
        assert_eq!(config.base_dir, Some(PathBuf::from("project")));
    }

    #[test]
    fn cli_overrides_config_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("custom.yaml"),
            "merge_target: origin/trunk\nbase: abc\ndebug: false\n",
        )
        .unwrap();

        let global = GlobalArgs {
            config: Some(PathBuf::from("custom.yaml")),
            merge_target: Some("origin/next".to_string()),
            diff_file: Some(PathBuf::from("-")),
            debug: true,
            ..Default::default()
        };
        let config = load_config(&global, temp_dir.path()).unwrap();
        assert_eq!(config.merge_target, "origin/next");
        assert_eq!(config.base.as_deref(), Some("abc"));
        assert_eq!(config.diff_file, Some(PathBuf::from("-")));
        assert!(config.debug);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let global = GlobalArgs {
            merge_target: Some(String::new()),
            ..Default::default()
        };
        let err = load_config(&global, temp_dir.path()).unwrap_err();
        assert!(matches!(err, TouchlineError::ConfigError(_)));
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let global = GlobalArgs {
            config: Some(PathBuf::from("absent.yaml")),
            ..Default::default()
        };
        assert!(load_config(&global, temp_dir.path()).is_err());
    }

    #[test]
    fn display_path_is_base_relative() {
        let service = test_helpers::inline_service(test_helpers::DIFF);
        let inside = service.resolver().resolve("src/A.java");
        let outside = service.resolver().resolve("/elsewhere/B.java");
        assert_eq!(display_path(&service, &inside), "src/A.java");
        assert_eq!(display_path(&service, &outside), "/elsewhere/B.java");
    }
}
