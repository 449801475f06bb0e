//! Error types for report loading.
//!
//! Parsing itself never fails; only getting the report text in can.

use std::path::PathBuf;

use health_report_core::ValidationError;
use thiserror::Error;

/// Errors that can occur while loading a report.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The report could not be read.
    #[error("failed to read report '{}': {source}", .path.display())]
    InputAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The report was rejected before parsing (type or size).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
