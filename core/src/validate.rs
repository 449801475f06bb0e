//! Upload, policy and summary validation.
//!
//! Validates the inputs handed to the engine (file type and size) and the
//! structural invariants of what it produces, catching problems such as
//! unsupported uploads, out-of-range scores and empty descriptions before
//! they reach the dashboard.
//!
//! # Examples
//!
//! ```
//! use health_report_core::*;
//!
//! assert!(validate_report_file_name("cluster.adoc").is_ok());
//! assert!(matches!(
//!     validate_report_file_name("cluster.pdf"),
//!     Err(ValidationError::UnsupportedExtension(_))
//! ));
//!
//! let summary = ReportSummary::default();
//! // Default summary has empty descriptions and metadata.
//! assert!(!validate_summary(&summary).is_empty());
//! ```

use std::path::Path;

use thiserror::Error;

use crate::{Category, ReportSummary, ScoringPolicy, Status};

/// File extensions accepted as health check reports.
pub const REPORT_EXTENSIONS: &[&str] = &["adoc", "asciidoc"];

/// Default upload size limit (10 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Upload, policy and summary validation errors.
///
/// Each variant describes a specific problem. The `Display` impl provides a
/// human-readable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// File name does not carry an accepted report extension.
    #[error("invalid file type: {0} (only .adoc or .asciidoc files are allowed)")]
    UnsupportedExtension(String),
    /// Input exceeds the configured size limit.
    #[error("file is {size} bytes, exceeding the limit of {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },
    /// A score field is outside `0..=100` or not finite.
    #[error("score {field} out of range: {value}")]
    ScoreOutOfRange { field: &'static str, value: f64 },
    /// A category description is empty.
    #[error("description for {0} is empty")]
    EmptyDescription(Category),
    /// Cluster or customer name is empty.
    #[error("metadata field {0} is empty")]
    EmptyMetadata(&'static str),
    /// An action-item entry is empty or whitespace-only.
    #[error("empty entry in {0} items")]
    EmptyItemEntry(Status),
    /// A status weight is outside `0..=100` or not finite.
    #[error("weight for {status} out of range: {value}")]
    InvalidWeight { status: Status, value: f64 },
    /// The neutral category score exceeds 100.
    #[error("neutral category score out of range: {0}")]
    InvalidNeutralScore(u8),
}

/// Returns `true` if `name` ends with one of `allowed` extensions
/// (compared case-insensitively, without the leading dot).
pub fn has_report_extension(name: &str, allowed: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Returns `true` if `name` has a `.adoc` or `.asciidoc` extension.
///
/// # Examples
///
/// ```
/// use health_report_core::is_valid_report_file;
///
/// assert!(is_valid_report_file("report.asciidoc"));
/// assert!(is_valid_report_file("REPORT.ADOC"));
/// assert!(!is_valid_report_file("report.adoc.txt"));
/// ```
pub fn is_valid_report_file(name: &str) -> bool {
    has_report_extension(name, REPORT_EXTENSIONS)
}

/// Rejects file names without an accepted report extension.
pub fn validate_report_file_name(name: &str) -> Result<(), ValidationError> {
    if is_valid_report_file(name) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedExtension(name.to_string()))
    }
}

/// Rejects inputs larger than `limit` bytes.
pub fn check_file_size(size: u64, limit: u64) -> Result<(), ValidationError> {
    if size > limit {
        return Err(ValidationError::FileTooLarge { size, limit });
    }
    Ok(())
}

/// Validates a scoring policy.
///
/// Every weight must be finite and within `0..=100`, and the neutral
/// category score must not exceed 100.
///
/// # Examples
///
/// ```
/// use health_report_core::*;
///
/// assert!(validate_policy(&ScoringPolicy::default()).is_empty());
///
/// let mut policy = ScoringPolicy::default();
/// policy.weights.advisory = 120.0;
/// assert_eq!(validate_policy(&policy).len(), 1);
/// ```
pub fn validate_policy(policy: &ScoringPolicy) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for status in Status::ALL {
        let Some(value) = policy.weight(status) else {
            continue;
        };
        if !in_score_range(value) {
            errors.push(ValidationError::InvalidWeight { status, value });
        }
    }

    if policy.neutral_category_score > 100 {
        errors.push(ValidationError::InvalidNeutralScore(
            policy.neutral_category_score,
        ));
    }

    errors
}

/// Validates a produced summary.
///
/// Checks score ranges, non-empty metadata, non-empty descriptions and
/// non-empty action-item entries. The engine always produces summaries that
/// pass this check; it exists for callers that deserialize summaries from
/// elsewhere and for strict CLI runs.
pub fn validate_summary(summary: &ReportSummary) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if summary.cluster_name.trim().is_empty() {
        errors.push(ValidationError::EmptyMetadata("clusterName"));
    }
    if summary.customer_name.trim().is_empty() {
        errors.push(ValidationError::EmptyMetadata("customerName"));
    }

    if !in_score_range(summary.overall_score) {
        errors.push(ValidationError::ScoreOutOfRange {
            field: "overallScore",
            value: summary.overall_score,
        });
    }

    for category in Category::ALL {
        let score = summary.category_score(category);
        if score > 100 {
            errors.push(ValidationError::ScoreOutOfRange {
                field: score_field_name(category),
                value: f64::from(score),
            });
        }
        if summary.category_description(category).trim().is_empty() {
            errors.push(ValidationError::EmptyDescription(category));
        }
    }

    for status in [Status::Required, Status::Recommended, Status::Advisory] {
        let entries = summary.items_for(status).unwrap_or_default();
        if entries.iter().any(|entry| entry.trim().is_empty()) {
            errors.push(ValidationError::EmptyItemEntry(status));
        }
    }

    errors
}

fn in_score_range(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

fn score_field_name(category: Category) -> &'static str {
    match category {
        Category::Infrastructure => "scoreInfra",
        Category::Governance => "scoreGovernance",
        Category::Compliance => "scoreCompliance",
        Category::Monitoring => "scoreMonitoring",
        Category::BuildSecurity => "scoreBuildSecurity",
    }
}
