//! Final summary assembly.

use health_report_core::{Category, Item, ReportSummary, ScoringPolicy, Status};

use super::scoring::{ScoreBreakdown, clamp_score};

/// Resolved score and description for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOutcome {
    pub category: Category,
    pub score: u8,
    pub description: String,
}

/// Builds the summary from deduplicated items, scores and descriptions.
///
/// Item lists keep document order. `NoChange` and `NotApplicable` items are
/// only counted.
pub fn assemble_summary(
    cluster_name: String,
    customer_name: String,
    items: &[Item],
    scores: &ScoreBreakdown,
    categories: &[CategoryOutcome],
    policy: &ScoringPolicy,
) -> ReportSummary {
    let mut summary = ReportSummary {
        cluster_name,
        customer_name,
        overall_score: clamp_score(scores.overall),
        items_required: summary_lines(items, Status::Required),
        items_recommended: summary_lines(items, Status::Recommended),
        items_advisory: summary_lines(items, Status::Advisory),
        no_change_count: scores.totals.no_change,
        not_applicable_count: scores.totals.not_applicable,
        ..ReportSummary::default()
    };

    for category in Category::ALL {
        match categories.iter().find(|outcome| outcome.category == category) {
            Some(outcome) => {
                summary.set_category(category, outcome.score.min(100), outcome.description.clone())
            }
            None => summary.set_category(
                category,
                policy.neutral_category_score.min(100),
                super::describe::generate_description(
                    category.label(),
                    policy.neutral_category_score,
                ),
            ),
        }
    }

    summary
}

fn summary_lines(items: &[Item], status: Status) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.status == status)
        .map(Item::summary_line)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::scoring::calculate_scores;
    use health_report_core::ColorTag;

    #[test]
    fn test_assemble_lists_and_counts() {
        let items = vec![
            Item::new("KubeadminUser", ColorTag::Red).with_observation("kubeadmin account still present"),
            Item::new("ClusterVersion", ColorTag::Green),
            Item::new("Quotas", ColorTag::Gray),
            Item::new("EtcdBackup", ColorTag::Yellow),
        ];
        let policy = ScoringPolicy::default();
        let scores = calculate_scores(&items, &[], &policy);
        let summary = assemble_summary(
            "prod".into(),
            "Acme".into(),
            &items,
            &scores,
            &[],
            &policy,
        );

        assert_eq!(
            summary.items_required,
            vec!["KubeadminUser: kubeadmin account still present"]
        );
        assert_eq!(summary.items_recommended, vec!["EtcdBackup"]);
        assert!(summary.items_advisory.is_empty());
        assert_eq!(summary.no_change_count, 1);
        assert_eq!(summary.not_applicable_count, 1);
        assert_eq!(summary.overall_score, 50.0);
    }

    #[test]
    fn test_missing_category_outcome_gets_neutral_values() {
        let policy = ScoringPolicy::default();
        let scores = calculate_scores(&[], &[], &policy);
        let summary = assemble_summary(String::new(), String::new(), &[], &scores, &[], &policy);
        for category in Category::ALL {
            assert_eq!(summary.category_score(category), 75);
            assert!(!summary.category_description(category).is_empty());
        }
    }
}
