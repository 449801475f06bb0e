//! Health check report summarization.
//!
//! This crate turns AsciiDoc health check reports into a structured
//! [`ReportSummary`]: scored categories, descriptions, and the lists of
//! required, recommended and advisory action items. It handles reports with
//! `ITEM START` / `ITEM END` markers, plain evaluation tables, and bare
//! color-tagged cells.
//!
//! # Main entry points
//!
//! - [`parse_report`]: summarize report text with the default policy.
//! - [`parse_report_with_diagnostics`]: same, with a custom
//!   [`ScoringPolicy`] and a full [`ParseReport`].
//! - [`load_report_file`] / [`parse_report_file`]: validate and read a
//!   report from disk.
//!
//! # Example
//!
//! ```
//! use health_report_parser::parse_report;
//!
//! let report = "\
//! == Summary
//!
//! |===
//! |Category |Item Evaluated |Observed Result |Recommendation
//!
//! {set:cellbgcolor!}
//! |Security
//! |<<KubeadminUser>>
//! |kubeadmin account still present
//! |{set:cellbgcolor:#FF0000}
//! Changes Required
//!
//! {set:cellbgcolor!}
//! |Cluster Config
//! |<<ClusterVersion>>
//! |Supported release
//! |{set:cellbgcolor:#00FF00}
//! No Change
//! |===
//! ";
//!
//! let summary = parse_report(report);
//! assert_eq!(summary.items_required, ["KubeadminUser: kubeadmin account still present"]);
//! assert_eq!(summary.no_change_count, 1);
//! assert_eq!(summary.overall_score, 50.0);
//! ```
//!
//! # Crate type
//!
//! This is a **library-only crate**. For command-line usage, use the
//! `health-report-cli` crate which provides the `report-summary` binary.
//!
//! [`ScoringPolicy`]: health_report_core::ScoringPolicy

pub mod document;
pub mod error;
pub mod output;
pub mod parser;
pub mod report;

use std::fs;
use std::path::Path;

use health_report_core::{
    REPORT_EXTENSIONS, ReportSummary, ScoringPolicy, ValidationError, check_file_size,
    has_report_extension,
};

pub use health_report_core::DEFAULT_MAX_FILE_SIZE;

pub use document::RawDocument;
pub use error::{ParseError, Result};
use parser::ReportParser;
use report::ParseReport;

/// Summary and report for one parse run.
#[derive(Debug, Clone)]
pub struct ParseRun {
    pub summary: ReportSummary,
    pub report: ParseReport,
}

/// Summarizes report text with the default scoring policy.
///
/// Never fails: malformed or unrecognized content degrades to defaults
/// (zero overall score, neutral category scores, default names).
///
/// # Examples
///
/// ```
/// use health_report_parser::parse_report;
///
/// let summary = parse_report("no report structure at all");
/// assert_eq!(summary.overall_score, 0.0);
/// assert_eq!(summary.score_infra, 75);
/// assert_eq!(summary.cluster_name, "OpenShift Cluster");
/// assert!(summary.items_required.is_empty());
/// ```
pub fn parse_report(text: &str) -> ReportSummary {
    parse_document(&RawDocument::from_text(text))
}

/// Summarizes an already loaded document with the default scoring policy.
pub fn parse_document(document: &RawDocument) -> ReportSummary {
    ReportParser::new(document).parse()
}

/// Summarizes report text with `policy` and produces a [`ParseReport`].
///
/// # Examples
///
/// ```
/// use health_report_core::ScoringPolicy;
/// use health_report_parser::parse_report_with_diagnostics;
///
/// let run = parse_report_with_diagnostics("= Notes\nnothing here", &ScoringPolicy::default());
/// assert!(run.report.degraded);
/// assert_eq!(run.report.strategy_used, None);
/// println!("{:?}", run.report.warnings);
/// ```
pub fn parse_report_with_diagnostics(text: &str, policy: &ScoringPolicy) -> ParseRun {
    parse_document_with_diagnostics(&RawDocument::from_text(text), policy, None)
}

/// Summarizes a document with `policy`, recording `source` in the report.
pub fn parse_document_with_diagnostics(
    document: &RawDocument,
    policy: &ScoringPolicy,
    source: Option<String>,
) -> ParseRun {
    let mut parser = ReportParser::new(document).with_policy(*policy);
    let summary = parser.parse();
    let report = ParseReport::from_run(source, &summary, parser.diagnostics());
    ParseRun { summary, report }
}

/// Validates and reads a report file.
///
/// The extension must be one of `allowed_extensions` (case-insensitive) and
/// the file must not exceed `max_file_size` bytes.
pub fn load_report_file(
    path: impl AsRef<Path>,
    allowed_extensions: &[&str],
    max_file_size: u64,
) -> Result<RawDocument> {
    let path = path.as_ref();
    let name = path.to_string_lossy();
    if !has_report_extension(&name, allowed_extensions) {
        return Err(ValidationError::UnsupportedExtension(name.into_owned()).into());
    }

    let metadata = fs::metadata(path).map_err(|source| ParseError::InputAccess {
        path: path.to_path_buf(),
        source,
    })?;
    check_file_size(metadata.len(), max_file_size)?;

    RawDocument::load(path)
}

/// Reads and summarizes a `.adoc` / `.asciidoc` report with default limits
/// and policy.
pub fn parse_report_file(path: impl AsRef<Path>) -> Result<ReportSummary> {
    let document = load_report_file(path, REPORT_EXTENSIONS, DEFAULT_MAX_FILE_SIZE)?;
    Ok(parse_document(&document))
}
