//! Config loading, validation, and conversion into service settings.

use super::model::{CONFIG_FILE_NAME, Config};
use crate::error::{Result, TouchlineError};
use crate::service::ServiceConfig;
use crate::source::{DiffSource, GitDiffSpec};
use std::path::{Path, PathBuf};
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            TouchlineError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load `.touchline.yaml` from `dir` if present, otherwise the defaults.
    pub fn discover<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let candidate = dir.as_ref().join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            debug!(path = %candidate.display(), "loading config");
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                TouchlineError::ConfigError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            TouchlineError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `merge_target` must be non-empty
    /// - `base`, if set, must be non-empty
    /// - `diff_args` must split cleanly under shell quoting rules
    pub fn validate(&self) -> Result<()> {
        if self.merge_target.trim().is_empty() {
            return Err(TouchlineError::ConfigError(
                "merge_target must not be empty".to_string(),
            ));
        }

        if self.base.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(TouchlineError::ConfigError(
                "base must not be empty when set".to_string(),
            ));
        }

        self.parsed_diff_args()?;
        Ok(())
    }

    /// Split `diff_args` into individual arguments.
    pub fn parsed_diff_args(&self) -> Result<Vec<String>> {
        shell_words::split(&self.diff_args).map_err(|e| {
            TouchlineError::ConfigError(format!(
                "failed to parse diff_args '{}': {}\n\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                self.diff_args, e
            ))
        })
    }

    /// The diff source this config selects.
    ///
    /// A diff file wins over git settings.
    pub fn diff_source(&self) -> Result<DiffSource> {
        if let Some(path) = &self.diff_file {
            return Ok(DiffSource::File(path.clone()));
        }
        Ok(DiffSource::Git(GitDiffSpec {
            merge_target: self.merge_target.clone(),
            base: self.base.clone(),
            extra_args: self.parsed_diff_args()?,
        }))
    }

    /// The base directory anchored at `cwd`.
    pub fn resolved_base_dir(&self, cwd: &Path) -> PathBuf {
        match &self.base_dir {
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        }
    }

    /// Build the query service settings, anchoring relative paths at `cwd`.
    pub fn service_config(&self, cwd: &Path) -> Result<ServiceConfig> {
        Ok(ServiceConfig {
            base_dir: self.resolved_base_dir(cwd),
            source: self.diff_source()?,
            debug: self.debug,
        })
    }
}
