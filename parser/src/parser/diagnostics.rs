//! Diagnostics for a single parse run.

use serde::{Deserialize, Serialize};

use health_report_core::Category;

use super::describe::DescriptionSource;
use super::scoring::{ScoreSource, StatusCounts};
use super::section::Section;

/// How one category's score and description were determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDiagnostics {
    pub category: Category,
    /// Determined score; `None` when the neutral default was substituted.
    pub score: Option<u8>,
    pub score_source: ScoreSource,
    pub description_source: DescriptionSource,
    pub counts: StatusCounts,
}

/// What the parser saw and decided while producing a summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseDiagnostics {
    pub total_lines: usize,
    pub section: Option<Section>,
    pub strategies_attempted: Vec<String>,
    pub strategy_used: Option<String>,
    /// Items produced by the winning strategy before deduplication.
    pub raw_items: usize,
    pub unique_items: usize,
    /// Candidate rows the winning strategy dropped (no name, legend or
    /// unresolvable color, unterminated block).
    pub discarded_rows: usize,
    pub totals: StatusCounts,
    pub overall_score_source: Option<ScoreSource>,
    pub categories: Vec<CategoryDiagnostics>,
    pub cluster_name_found: bool,
    pub customer_name_found: bool,
}

impl ParseDiagnostics {
    /// Returns `true` when no `Summary` heading was found.
    pub fn degraded(&self) -> bool {
        self.section.is_none_or(|section| section.is_degraded())
    }

    pub fn duplicates_collapsed(&self) -> usize {
        self.raw_items.saturating_sub(self.unique_items)
    }

    /// Categories whose score fell back to the neutral default.
    pub fn neutral_categories(&self) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|c| c.score.is_none())
            .map(|c| c.category)
            .collect()
    }

    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.degraded() {
            warnings.push("No Summary section found; scanned the whole document".to_string());
        }

        if self.strategy_used.is_none() {
            warnings.push(format!(
                "No items extracted (tried: {})",
                self.strategies_attempted.join(", ")
            ));
        }

        if self.discarded_rows > 0 {
            warnings.push(format!(
                "Dropped {} rows without a name or resolvable status",
                self.discarded_rows
            ));
        }

        if self.duplicates_collapsed() > 0 {
            warnings.push(format!(
                "Collapsed {} duplicate items",
                self.duplicates_collapsed()
            ));
        }

        let neutral = self.neutral_categories();
        if !neutral.is_empty() {
            let labels: Vec<&str> = neutral.iter().map(|c| c.label()).collect();
            warnings.push(format!(
                "No score found for {}; used the neutral default",
                labels.join(", ")
            ));
        }

        if !self.cluster_name_found {
            warnings.push("Cluster name not found; used the default".to_string());
        }
        if !self.customer_name_found {
            warnings.push("Customer name not found; used the default".to_string());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::section::SectionKind;

    #[test]
    fn test_warnings_for_degraded_empty_run() {
        let diagnostics = ParseDiagnostics {
            section: Some(Section::whole_document(3)),
            strategies_attempted: vec!["marker".into(), "table".into(), "color".into()],
            ..ParseDiagnostics::default()
        };
        let warnings = diagnostics.warnings();
        assert!(warnings[0].starts_with("No Summary section"));
        assert_eq!(warnings[1], "No items extracted (tried: marker, table, color)");
    }

    #[test]
    fn test_no_warnings_for_clean_run() {
        let diagnostics = ParseDiagnostics {
            section: Some(Section {
                start: 1,
                end: 10,
                kind: SectionKind::Summary,
            }),
            strategy_used: Some("marker".into()),
            raw_items: 2,
            unique_items: 2,
            cluster_name_found: true,
            customer_name_found: true,
            ..ParseDiagnostics::default()
        };
        assert!(diagnostics.warnings().is_empty());
        assert!(!diagnostics.degraded());
    }

    #[test]
    fn test_neutral_categories() {
        let diagnostics = ParseDiagnostics {
            categories: vec![CategoryDiagnostics {
                category: Category::Monitoring,
                score: None,
                score_source: ScoreSource::Default,
                description_source: DescriptionSource::Generated,
                counts: StatusCounts::default(),
            }],
            ..ParseDiagnostics::default()
        };
        assert_eq!(diagnostics.neutral_categories(), vec![Category::Monitoring]);
        assert_eq!(diagnostics.duplicates_collapsed(), 0);
    }
}
