//! Overall and per-category health scores.
//!
//! Scores are weighted means over counted items (everything except
//! `NotApplicable`). A category with no counted items falls back to a
//! percentage written next to its heading in the report, and then to the
//! policy's neutral score. That last case is kept as "absent" in
//! [`CategoryScore::score`] so diagnostics can tell it apart from a real
//! score equal to the neutral value.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use health_report_core::{Category, Item, ScoringPolicy, Status};

use super::util;

/// `*Heading*: N%` label for each category, in `Category::ALL` order.
static BOLD_LABEL_RES: LazyLock<[(Category, Regex); 5]> = LazyLock::new(|| {
    Category::ALL.map(|category| {
        let pattern = format!(
            r"\*{}\*\s*:?\s*(\d{{1,3}})\s*%",
            regex::escape(category.heading())
        );
        (category, Regex::new(&pattern).expect("static regex must compile"))
    })
});

/// Per-status item tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub required: u32,
    pub recommended: u32,
    pub advisory: u32,
    pub no_change: u32,
    pub not_applicable: u32,
}

impl StatusCounts {
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> Self {
        let mut counts = Self::default();
        for item in items {
            counts.record(item.status);
        }
        counts
    }

    pub fn record(&mut self, status: Status) {
        match status {
            Status::Required => self.required += 1,
            Status::Recommended => self.recommended += 1,
            Status::Advisory => self.advisory += 1,
            Status::NoChange => self.no_change += 1,
            Status::NotApplicable => self.not_applicable += 1,
        }
    }

    pub fn get(&self, status: Status) -> u32 {
        match status {
            Status::Required => self.required,
            Status::Recommended => self.recommended,
            Status::Advisory => self.advisory,
            Status::NoChange => self.no_change,
            Status::NotApplicable => self.not_applicable,
        }
    }

    /// Items that enter score denominators.
    pub fn counted(&self) -> u32 {
        Status::ALL
            .iter()
            .filter(|status| status.is_counted())
            .map(|status| self.get(*status))
            .sum()
    }

    /// Weighted mean score over counted items, or `None` when there are none.
    pub fn weighted_score(&self, policy: &ScoringPolicy) -> Option<f64> {
        let counted = self.counted();
        if counted == 0 {
            return None;
        }
        let total: f64 = Status::ALL
            .iter()
            .filter_map(|status| {
                policy
                    .weight(*status)
                    .map(|weight| weight * f64::from(self.get(*status)))
            })
            .sum();
        Some(clamp_score(total / f64::from(counted)))
    }
}

/// Where a score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Weighted mean of extracted items.
    Computed,
    /// Percentage written in the report text.
    Inline,
    /// Nothing found; the default applies.
    Default,
}

/// Score of one reporting category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Determined score; `None` when the neutral default applies.
    pub score: Option<u8>,
    pub source: ScoreSource,
    pub counts: StatusCounts,
}

impl CategoryScore {
    /// Returns the determined score, or the policy's neutral score.
    pub fn resolved(&self, policy: &ScoringPolicy) -> u8 {
        self.score
            .unwrap_or(policy.neutral_category_score)
            .min(100)
    }
}

/// Scores for a whole report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: f64,
    pub overall_source: ScoreSource,
    pub totals: StatusCounts,
    pub categories: Vec<CategoryScore>,
}

impl ScoreBreakdown {
    pub fn category(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.category == category)
    }
}

/// Computes overall and per-category scores.
///
/// `document` is the full report text; it is only consulted for explicit
/// percentages when items alone cannot determine a score.
pub fn calculate_scores(items: &[Item], document: &[String], policy: &ScoringPolicy) -> ScoreBreakdown {
    let totals = StatusCounts::from_items(items);

    let (overall, overall_source) = match totals.weighted_score(policy) {
        Some(score) => (score, ScoreSource::Computed),
        None => match super::metadata::explicit_overall_score(document) {
            Some(score) => (clamp_score(score), ScoreSource::Inline),
            None => (0.0, ScoreSource::Default),
        },
    };

    let categories = Category::ALL
        .iter()
        .map(|category| score_category(*category, items, document, policy))
        .collect();

    ScoreBreakdown {
        overall,
        overall_source,
        totals,
        categories,
    }
}

fn score_category(
    category: Category,
    items: &[Item],
    document: &[String],
    policy: &ScoringPolicy,
) -> CategoryScore {
    let counts = StatusCounts::from_items(items.iter().filter(|item| item.bucket() == Some(category)));

    let (score, source) = if let Some(score) = counts.weighted_score(policy) {
        (Some(round_score(score)), ScoreSource::Computed)
    } else if let Some(score) = inline_category_percentage(document, category) {
        (Some(score), ScoreSource::Inline)
    } else {
        (None, ScoreSource::Default)
    };

    debug!(category = category.label(), ?score, ?source, "scored category");
    CategoryScore {
        category,
        score,
        source,
        counts,
    }
}

/// Finds a percentage written for `category` in the report text.
///
/// Tried in order: a bold label (`*Infrastructure Setup*: 85%`), any line
/// naming the heading with a percentage, and a percentage on one of the two
/// lines following a heading or bold label for the category. An explicit
/// `0%` is a real value.
pub fn inline_category_percentage(document: &[String], category: Category) -> Option<u8> {
    let heading = category.heading();
    let lowered_heading = heading.to_lowercase();

    let bold_label = BOLD_LABEL_RES
        .iter()
        .find(|(candidate, _)| *candidate == category)
        .map(|(_, re)| re);
    if let Some(score) = bold_label.and_then(|re| {
        document
            .iter()
            .find_map(|line| re.captures(line).and_then(|caps| parse_percent(&caps[1])))
    }) {
        return Some(score);
    }

    if let Some(score) = document
        .iter()
        .filter(|line| line.to_lowercase().contains(&lowered_heading))
        .find_map(|line| first_percentage(line))
    {
        return Some(score);
    }

    document.iter().enumerate().find_map(|(index, line)| {
        if !names_category(line, heading) {
            return None;
        }
        document
            .iter()
            .skip(index + 1)
            .filter(|next| !next.trim().is_empty())
            .take(2)
            .find_map(|next| first_percentage(next))
    })
}

/// Returns `true` for a heading or bold label line naming `heading`.
pub(crate) fn names_category(line: &str, heading: &str) -> bool {
    let lowered_heading = heading.to_lowercase();
    if let Some((_, title)) = util::heading(line) {
        return title.to_lowercase().contains(&lowered_heading);
    }
    let trimmed = line.trim_start();
    trimmed
        .strip_prefix('*')
        .and_then(|rest| rest.split_once('*'))
        .is_some_and(|(label, _)| label.trim().eq_ignore_ascii_case(heading))
}

fn first_percentage(line: &str) -> Option<u8> {
    let (number, _) = line.split_once('%')?;
    let number = number.trim_end();
    let prefix = number.trim_end_matches(|ch: char| ch.is_ascii_digit());
    let digits = &number[prefix.len()..];
    if digits.is_empty() || digits.len() > 3 {
        return None;
    }
    parse_percent(digits)
}

fn parse_percent(digits: &str) -> Option<u8> {
    let value: u16 = digits.parse().ok()?;
    Some(value.min(100) as u8)
}

/// Clamps to `0..=100`, mapping non-finite values to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

fn round_score(value: f64) -> u8 {
    clamp_score(value).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_report_core::ColorTag;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_required_and_no_change_average_to_fifty() {
        let items = vec![
            Item::new("KubeadminUser", ColorTag::Red),
            Item::new("ClusterVersion", ColorTag::Green),
        ];
        let scores = calculate_scores(&items, &[], &ScoringPolicy::default());
        assert_eq!(scores.overall, 50.0);
        assert_eq!(scores.overall_source, ScoreSource::Computed);
    }

    #[test]
    fn test_one_of_each_counted_status() {
        let items = vec![
            Item::new("a", ColorTag::Red),
            Item::new("b", ColorTag::Yellow),
            Item::new("c", ColorTag::LightBlue),
            Item::new("d", ColorTag::Green),
        ];
        let scores = calculate_scores(&items, &[], &ScoringPolicy::default());
        assert_eq!(scores.overall, 57.5);
    }

    #[test]
    fn test_not_applicable_never_changes_the_score() {
        let base = vec![Item::new("a", ColorTag::Yellow)];
        let mut with_gray = base.clone();
        with_gray.push(Item::new("b", ColorTag::Gray));

        let policy = ScoringPolicy::default();
        assert_eq!(
            calculate_scores(&base, &[], &policy).overall,
            calculate_scores(&with_gray, &[], &policy).overall
        );
    }

    #[test]
    fn test_only_not_applicable_items_score_zero() {
        let items = vec![Item::new("a", ColorTag::Gray)];
        let scores = calculate_scores(&items, &[], &ScoringPolicy::default());
        assert_eq!(scores.overall, 0.0);
        assert_eq!(scores.overall_source, ScoreSource::Default);
        assert_eq!(scores.totals.not_applicable, 1);
    }

    #[test]
    fn test_explicit_overall_statement_used_without_items() {
        let doc = lines("Overall Cluster Health: 72%");
        let scores = calculate_scores(&[], &doc, &ScoringPolicy::default());
        assert_eq!(scores.overall, 72.0);
        assert_eq!(scores.overall_source, ScoreSource::Inline);
    }

    #[test]
    fn test_category_computed_from_bucketed_items() {
        let items = vec![
            Item::new("a", ColorTag::Red).with_category("Security"),
            Item::new("b", ColorTag::LightBlue).with_category("CIS Benchmark"),
            Item::new("c", ColorTag::Green).with_category("Networking"),
        ];
        let scores = calculate_scores(&items, &[], &ScoringPolicy::default());
        let compliance = scores.category(Category::Compliance).unwrap();
        assert_eq!(compliance.score, Some(40));
        assert_eq!(compliance.source, ScoreSource::Computed);
        let infra = scores.category(Category::Infrastructure).unwrap();
        assert_eq!(infra.score, Some(100));
    }

    #[test]
    fn test_category_without_items_uses_inline_then_neutral() {
        let doc = lines("*Central Monitoring*: 0%\n== Policy Governance\n\nScore: 64%");
        let scores = calculate_scores(&[], &doc, &ScoringPolicy::default());

        let monitoring = scores.category(Category::Monitoring).unwrap();
        assert_eq!(monitoring.score, Some(0));
        assert_eq!(monitoring.source, ScoreSource::Inline);

        let governance = scores.category(Category::Governance).unwrap();
        assert_eq!(governance.score, Some(64));

        let infra = scores.category(Category::Infrastructure).unwrap();
        assert_eq!(infra.score, None);
        assert_eq!(infra.source, ScoreSource::Default);
        assert_eq!(infra.resolved(&ScoringPolicy::default()), 75);
    }

    #[test]
    fn test_inline_percentage_forms() {
        let doc = lines("The Build/Deploy Security area scored 88 % this quarter");
        assert_eq!(
            inline_category_percentage(&doc, Category::BuildSecurity),
            Some(88)
        );
        let doc = lines("*Compliance Benchmarking*: 250%");
        assert_eq!(
            inline_category_percentage(&doc, Category::Compliance),
            Some(100)
        );
        assert_eq!(inline_category_percentage(&doc, Category::Monitoring), None);
    }

    #[test]
    fn test_bold_label_patterns_cover_every_category() {
        let categories: Vec<Category> = BOLD_LABEL_RES.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, Category::ALL.to_vec());

        for category in Category::ALL {
            let doc = vec![format!("*{}*: 42%", category.heading())];
            assert_eq!(inline_category_percentage(&doc, category), Some(42));
        }
    }

    #[test]
    fn test_custom_policy_weights() {
        let mut policy = ScoringPolicy::default();
        policy.weights.recommended = 40.0;
        let items = vec![Item::new("a", ColorTag::Yellow)];
        assert_eq!(calculate_scores(&items, &[], &policy).overall, 40.0);
    }

    #[test]
    fn test_clamp_score() {
        assert_eq!(clamp_score(140.0), 100.0);
        assert_eq!(clamp_score(-3.0), 0.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
    }
}
