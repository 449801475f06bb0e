//! Error types for configuration loading and validation.

use health_report_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading, saving or validating a config.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The config parsed but holds values the engine cannot use.
    #[error("invalid config: {}", format_problems(.0))]
    Invalid(Vec<ValidationError>),

    /// The input section allows no file extensions.
    #[error("invalid config: input.allowed_extensions is empty")]
    NoExtensions,
}

fn format_problems(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
