//! Health check report parser.
//!
//! This module turns the text of an AsciiDoc health check report into a
//! [`ReportSummary`]. Reports are produced by different generations of
//! tooling, so extraction is layered:
//!
//! - **Section location**: the table under the `Summary` heading, or the
//!   whole document when there is none (degraded mode).
//! - **Item extraction**: marker-delimited blocks, then a header-anchored
//!   table, then a bare color-tag scan. The first strategy that yields
//!   items wins.
//! - **Scoring**: weighted means over counted items, with inline
//!   percentages and a neutral default as fallbacks for categories.
//! - **Descriptions and metadata**: authored prose when present, generated
//!   sentences and default names otherwise.
//!
//! Parsing never fails on malformed content; everything unexpected degrades
//! to defaults and is recorded in [`ParseDiagnostics`].
//!
//! The primary entry point is [`ReportParser::new`] followed by
//! [`ReportParser::parse`], but most consumers should use
//! [`parse_report`](crate::parse_report) instead.

mod assemble;
mod classify;
mod describe;
mod diagnostics;
mod merge;
mod metadata;
mod scoring;
mod section;
mod strategies;
mod util;

use tracing::{debug, info};

use health_report_core::{
    Category, DEFAULT_CLUSTER_NAME, DEFAULT_CUSTOMER_NAME, ReportSummary, ScoringPolicy,
};

use crate::document::RawDocument;
use assemble::CategoryOutcome;

pub use classify::{TagLine, classify_tag_line, is_legend_row};
pub use describe::{DescriptionSource, authored_description, generate_description};
pub use diagnostics::{CategoryDiagnostics, ParseDiagnostics};
pub use merge::deduplicate_items;
pub use metadata::{
    explicit_overall_score, extract_cluster_name, extract_customer_name, find_cluster_name,
    find_customer_name,
};
pub use scoring::{
    CategoryScore, ScoreBreakdown, ScoreSource, StatusCounts, calculate_scores,
    inline_category_percentage,
};
pub use section::{Section, SectionKind, locate_summary};
pub use strategies::{
    ColorScanStrategy, Extraction, ExtractionStrategy, MarkerStrategy, PipelineOutcome,
    TableStrategy, first_non_empty, ranked_strategies, ranked_strategy_names,
};

/// Parser for one report document.
pub struct ReportParser<'a> {
    document: &'a RawDocument,
    policy: ScoringPolicy,
    diagnostics: ParseDiagnostics,
}

impl<'a> ReportParser<'a> {
    pub fn new(document: &'a RawDocument) -> Self {
        Self {
            document,
            policy: ScoringPolicy::default(),
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Replaces the default scoring policy.
    pub fn with_policy(mut self, policy: ScoringPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> ParseDiagnostics {
        self.diagnostics
    }

    /// Produces the summary. Deterministic for a given document and policy.
    pub fn parse(&mut self) -> ReportSummary {
        let lines = self.document.lines();
        let mut diagnostics = ParseDiagnostics {
            total_lines: lines.len(),
            ..ParseDiagnostics::default()
        };

        let section = locate_summary(lines);
        diagnostics.section = Some(section);

        let outcome = first_non_empty(&ranked_strategies(), self.document.section_lines(&section));
        diagnostics.strategies_attempted =
            outcome.attempted.iter().map(|name| name.to_string()).collect();
        diagnostics.strategy_used = outcome.strategy.map(str::to_string);
        diagnostics.raw_items = outcome.items.len();
        diagnostics.discarded_rows = outcome.discarded;

        let items = deduplicate_items(outcome.items);
        diagnostics.unique_items = items.len();
        debug!(
            strategy = ?outcome.strategy,
            raw = diagnostics.raw_items,
            unique = items.len(),
            "extracted items"
        );

        let scores = calculate_scores(&items, lines, &self.policy);
        diagnostics.totals = scores.totals;
        diagnostics.overall_score_source = Some(scores.overall_source);

        let mut categories = Vec::with_capacity(Category::ALL.len());
        for category_score in &scores.categories {
            let score = category_score.resolved(&self.policy);
            let (description, description_source) =
                describe::describe_category(lines, category_score.category, score);
            diagnostics.categories.push(CategoryDiagnostics {
                category: category_score.category,
                score: category_score.score,
                score_source: category_score.source,
                description_source,
                counts: category_score.counts,
            });
            categories.push(CategoryOutcome {
                category: category_score.category,
                score,
                description,
            });
        }

        let cluster_name = find_cluster_name(lines);
        let customer_name = find_customer_name(lines);
        diagnostics.cluster_name_found = cluster_name.is_some();
        diagnostics.customer_name_found = customer_name.is_some();

        let summary = assemble::assemble_summary(
            cluster_name.unwrap_or_else(|| DEFAULT_CLUSTER_NAME.to_string()),
            customer_name.unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string()),
            &items,
            &scores,
            &categories,
            &self.policy,
        );

        info!(
            items = items.len(),
            overall = summary.overall_score,
            degraded = diagnostics.degraded(),
            "parsed report"
        );
        self.diagnostics = diagnostics;
        summary
    }
}
