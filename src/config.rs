use crate::apply::ApplyOptions;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings for the `rule-fixer` binary.
///
/// ```toml
/// [apply]
/// on_conflict = "error"   # or "skip" (default)
///
/// [output]
/// diff = true
/// context_lines = 3
/// ```
#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FixerConfig {
    #[serde(default)]
    pub apply: ApplyOptions,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default)]
    pub diff: bool,
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            diff: false,
            context_lines: default_context_lines(),
        }
    }
}

fn default_context_lines() -> usize {
    3
}

/// Largest diff context accepted in `[output] context_lines`.
pub const MAX_CONTEXT_LINES: usize = 100;

impl FixerConfig {
    /// Check settings that deserialize fine but make no sense together.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.output.context_lines > MAX_CONTEXT_LINES {
            issues.push(ValidationIssue::ContextLinesTooLarge {
                value: self.output.context_lines,
            });
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    ContextLinesTooLarge { value: usize },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::ContextLinesTooLarge { value } => write!(
                f,
                "output.context_lines must be at most {MAX_CONTEXT_LINES}, got {value}"
            ),
        }
    }
}

/// Every problem found by [`FixerConfig::validate`], not just the first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();
    rendered.join("; ")
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" ({})", p.display()))
        .unwrap_or_default()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML{}: {source}", origin(.path))]
    Toml {
        path: Option<PathBuf>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("invalid config{}: {source}", origin(.path))]
    Validation {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

fn parse(input: &str, path: Option<&Path>) -> Result<FixerConfig, ConfigError> {
    let path = path.map(Path::to_path_buf);
    let config: FixerConfig =
        toml_edit::de::from_str(input).map_err(|source| ConfigError::Toml {
            path: path.clone(),
            source,
        })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path, source })?;
    Ok(config)
}

pub fn load_from_str(input: &str) -> Result<FixerConfig, ConfigError> {
    parse(input, None)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<FixerConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, Some(path))
}
