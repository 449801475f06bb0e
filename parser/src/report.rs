//! Structured parse reporting.

use serde::{Deserialize, Serialize};

use health_report_core::{ReportSummary, validate_summary};

use crate::parser::{CategoryDiagnostics, ParseDiagnostics, ScoreSource, StatusCounts};

/// Structured failure code for reports that could not be summarized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureCode {
    /// The file could not be read.
    InputAccess,
    /// The file was rejected by extension or size.
    InputRejected,
    /// A summary was produced but failed validation.
    InvalidSummary,
}

impl std::fmt::Display for FailureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputAccess => write!(f, "input_access"),
            Self::InputRejected => write!(f, "input_rejected"),
            Self::InvalidSummary => write!(f, "invalid_summary"),
        }
    }
}

/// Per-report parse report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReport {
    /// Input path, when the report came from a file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub success: bool,
    /// `true` when no `Summary` heading was found.
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_code: Option<FailureCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_detail: Option<String>,
    pub strategy_used: Option<String>,
    pub strategies_attempted: Vec<String>,
    pub total_lines: usize,
    pub section_start: Option<usize>,
    pub section_end: Option<usize>,
    pub raw_items: usize,
    pub unique_items: usize,
    pub discarded_rows: usize,
    pub status_counts: StatusCounts,
    pub overall_score: f64,
    pub overall_score_source: Option<ScoreSource>,
    pub categories: Vec<CategoryDiagnostics>,
    pub warnings: Vec<String>,
    pub validation_errors: Vec<String>,
}

impl ParseReport {
    /// Builds the report for a completed parse.
    pub fn from_run(
        source: Option<String>,
        summary: &ReportSummary,
        diagnostics: &ParseDiagnostics,
    ) -> Self {
        let validation_errors: Vec<String> = validate_summary(summary)
            .iter()
            .map(ToString::to_string)
            .collect();
        let success = validation_errors.is_empty();

        Self {
            source,
            success,
            degraded: diagnostics.degraded(),
            failure_code: (!success).then_some(FailureCode::InvalidSummary),
            failure_detail: (!success).then(|| validation_errors.join("; ")),
            strategy_used: diagnostics.strategy_used.clone(),
            strategies_attempted: diagnostics.strategies_attempted.clone(),
            total_lines: diagnostics.total_lines,
            section_start: diagnostics.section.map(|s| s.start),
            section_end: diagnostics.section.map(|s| s.end),
            raw_items: diagnostics.raw_items,
            unique_items: diagnostics.unique_items,
            discarded_rows: diagnostics.discarded_rows,
            status_counts: diagnostics.totals,
            overall_score: summary.overall_score,
            overall_score_source: diagnostics.overall_score_source,
            categories: diagnostics.categories.clone(),
            warnings: diagnostics.warnings(),
            validation_errors,
        }
    }

    /// Builds the report for an input that never reached the parser.
    pub fn failure(source: Option<String>, code: FailureCode, detail: impl Into<String>) -> Self {
        Self {
            source,
            success: false,
            degraded: false,
            failure_code: Some(code),
            failure_detail: Some(detail.into()),
            strategy_used: None,
            strategies_attempted: Vec::new(),
            total_lines: 0,
            section_start: None,
            section_end: None,
            raw_items: 0,
            unique_items: 0,
            discarded_rows: 0,
            status_counts: StatusCounts::default(),
            overall_score: 0.0,
            overall_score_source: None,
            categories: Vec::new(),
            warnings: Vec::new(),
            validation_errors: Vec::new(),
        }
    }
}

/// Batch report for a directory run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseReportBundle {
    pub generated_at: String,
    pub version: String,
    pub reports: Vec<ParseReport>,
    pub failures: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_report_with_diagnostics;
    use health_report_core::ScoringPolicy;

    #[test]
    fn test_failure_code_display_matches_serde() {
        for code in [
            FailureCode::InputAccess,
            FailureCode::InputRejected,
            FailureCode::InvalidSummary,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{code}\""));
        }
    }

    #[test]
    fn test_report_from_run_is_successful() {
        let run = parse_report_with_diagnostics("== Summary\n", &ScoringPolicy::default());
        assert!(run.report.success);
        assert!(!run.report.degraded);
        assert_eq!(run.report.section_start, Some(1));
        assert!(run.report.validation_errors.is_empty());

        let json = serde_json::to_string(&run.report).unwrap();
        assert!(!json.contains("failure_code"));
        assert!(!json.contains("\"source\""));
    }

    #[test]
    fn test_failure_report_includes_failure_fields() {
        let report = ParseReport::failure(
            Some("bad.pdf".to_string()),
            FailureCode::InputRejected,
            "invalid file type",
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"failure_code\":\"input_rejected\""));
        assert!(json.contains("bad.pdf"));
        assert!(!report.success);
    }
}
