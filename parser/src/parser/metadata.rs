//! Cluster and customer names, and explicit overall-score statements.
//!
//! Document attributes (`:cluster-name: prod-east`) win over prose. Prose
//! patterns are tried in order and the first hit is used.

use regex::Regex;
use std::sync::LazyLock;

use health_report_core::{DEFAULT_CLUSTER_NAME, DEFAULT_CUSTOMER_NAME};

static PATTERNS: LazyLock<MetadataPatterns> = LazyLock::new(MetadataPatterns::new);

struct MetadataPatterns {
    cluster_attribute: Regex,
    customer_attribute: Regex,
    quoted_token: Regex,
    cluster_word: Regex,
    customer_sentence: Regex,
    overall_cluster_health: Regex,
    overall_health_score: Regex,
}

impl MetadataPatterns {
    fn new() -> Self {
        Self {
            // :cluster-name: prod-east
            cluster_attribute: Regex::new(r"^:(?i:cluster[-_]?name|cluster):\s*(\S.*?)\s*$")
                .expect("static regex must compile"),
            // :customer-name: Acme Corp
            customer_attribute: Regex::new(
                r"^:(?i:customer[-_]?name|customer|client[-_]?name):\s*(\S.*?)\s*$",
            )
            .expect("static regex must compile"),
            // "prod-east", `prod-east` or 'prod-east'
            quoted_token: Regex::new(r#""([^"\s][^"]*)"|`([^`\s][^`]*)`|(?:^|\s)'([^'\s][^']*)'"#)
                .expect("static regex must compile"),
            // cluster prod-east
            cluster_word: Regex::new(r"(?i)\bcluster\s+([A-Za-z0-9][A-Za-z0-9_.-]*)")
                .expect("static regex must compile"),
            // Red Hat conducted a health check for Acme Corp's cluster
            customer_sentence: Regex::new(
                r"(?i)\bconducted\b.*?\bfor\s+(?:the\s+)?([A-Za-z0-9][A-Za-z0-9&.,\- ]*?)['’]s\b",
            )
            .expect("static regex must compile"),
            overall_cluster_health: Regex::new(
                r"(?i)overall\s+cluster\s+health\s*:?\s*(\d+(?:\.\d+)?)\s*%",
            )
            .expect("static regex must compile"),
            overall_health_score: Regex::new(r"(?i)overall\s+health\s+score\D*?(\d+(?:\.\d+)?)\s*%")
                .expect("static regex must compile"),
        }
    }
}

/// Words that follow "cluster" in prose but are never a cluster name.
const CLUSTER_STOP_WORDS: &[&str] = &[
    "a",
    "admin",
    "administrator",
    "administrators",
    "an",
    "and",
    "are",
    "as",
    "at",
    "be",
    "by",
    "config",
    "configuration",
    "for",
    "from",
    "has",
    "have",
    "health",
    "in",
    "is",
    "it",
    "level",
    "name",
    "nodes",
    "of",
    "on",
    "operator",
    "operators",
    "should",
    "that",
    "the",
    "this",
    "to",
    "version",
    "was",
    "which",
    "will",
    "with",
];

const MAX_NAME_LEN: usize = 80;

/// Returns the cluster name, or [`DEFAULT_CLUSTER_NAME`].
pub fn extract_cluster_name(document: &[String]) -> String {
    find_cluster_name(document).unwrap_or_else(|| DEFAULT_CLUSTER_NAME.to_string())
}

/// Returns the customer name, or [`DEFAULT_CUSTOMER_NAME`].
pub fn extract_customer_name(document: &[String]) -> String {
    find_customer_name(document).unwrap_or_else(|| DEFAULT_CUSTOMER_NAME.to_string())
}

/// Finds the cluster name without applying the default.
pub fn find_cluster_name(document: &[String]) -> Option<String> {
    let patterns = &*PATTERNS;

    if let Some(name) = attribute_value(document, &patterns.cluster_attribute) {
        return Some(name);
    }

    let cluster_lines = || {
        document
            .iter()
            .filter(|line| line.to_lowercase().contains("cluster"))
    };

    let quoted = cluster_lines().find_map(|line| {
        patterns.quoted_token.captures_iter(line).find_map(|caps| {
            (1..=3)
                .find_map(|group| caps.get(group))
                .map(|m| m.as_str().trim().to_string())
                .filter(|name| is_plausible_name(name))
        })
    });
    if quoted.is_some() {
        return quoted;
    }

    cluster_lines().find_map(|line| {
        patterns.cluster_word.captures_iter(line).find_map(|caps| {
            let candidate = caps[1].trim_end_matches(['.', '-', '_']);
            let is_stop_word = CLUSTER_STOP_WORDS
                .iter()
                .any(|word| word.eq_ignore_ascii_case(candidate));
            (!candidate.is_empty() && !is_stop_word).then(|| candidate.to_string())
        })
    })
}

/// Finds the customer name without applying the default.
pub fn find_customer_name(document: &[String]) -> Option<String> {
    let patterns = &*PATTERNS;

    if let Some(name) = attribute_value(document, &patterns.customer_attribute) {
        return Some(name);
    }

    document.iter().find_map(|line| {
        patterns
            .customer_sentence
            .captures(line)
            .map(|caps| caps[1].trim().trim_end_matches(',').to_string())
            .filter(|name| is_plausible_name(name))
    })
}

/// Returns the overall score from an explicit statement such as
/// `Overall Cluster Health: 72%`, if the report contains one.
pub fn explicit_overall_score(document: &[String]) -> Option<f64> {
    let patterns = &*PATTERNS;
    [&patterns.overall_cluster_health, &patterns.overall_health_score]
        .iter()
        .find_map(|pattern| {
            document.iter().find_map(|line| {
                pattern
                    .captures(line)
                    .and_then(|caps| caps[1].parse::<f64>().ok())
            })
        })
}

fn attribute_value(document: &[String], pattern: &Regex) -> Option<String> {
    document.iter().find_map(|line| {
        pattern
            .captures(line.trim())
            .map(|caps| caps[1].to_string())
            .filter(|value| is_plausible_name(value))
    })
}

fn is_plausible_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_NAME_LEN && !name.contains('{')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_cluster_attribute_wins() {
        let doc = lines("The cluster \"other\" was reviewed.\n:cluster-name: prod-east");
        assert_eq!(extract_cluster_name(&doc), "prod-east");
    }

    #[test]
    fn test_cluster_quoted_token() {
        let doc = lines("Acme's cluster 'ocp-prod-01' runs 4.14.");
        assert_eq!(extract_cluster_name(&doc), "ocp-prod-01");
        let doc = lines("Findings for cluster `lab.example`:");
        assert_eq!(extract_cluster_name(&doc), "lab.example");
    }

    #[test]
    fn test_cluster_word_skips_stop_words() {
        let doc = lines("= Cluster Health Report\nThe cluster is healthy.\nWe reviewed cluster ocp4-dev.");
        assert_eq!(extract_cluster_name(&doc), "ocp4-dev");
    }

    #[test]
    fn test_cluster_default() {
        let doc = lines("<<ClusterVersion>>\nNothing here.");
        assert_eq!(extract_cluster_name(&doc), DEFAULT_CLUSTER_NAME);
        assert_eq!(find_cluster_name(&doc), None);
    }

    #[test]
    fn test_customer_sentence() {
        let doc = lines("Red Hat conducted a health check for Acme Corp's OpenShift cluster.");
        assert_eq!(extract_customer_name(&doc), "Acme Corp");
        let doc = lines("Consulting conducted a review for the Globex’s platform team.");
        assert_eq!(extract_customer_name(&doc), "Globex");
    }

    #[test]
    fn test_customer_attribute_and_default() {
        let doc = lines(":customer-name: Initech");
        assert_eq!(extract_customer_name(&doc), "Initech");
        assert_eq!(extract_customer_name(&[]), DEFAULT_CUSTOMER_NAME);
    }

    #[test]
    fn test_explicit_overall_score() {
        let doc = lines("Overall Cluster Health: 72%");
        assert_eq!(explicit_overall_score(&doc), Some(72.0));
        let doc = lines("The overall health score for this review is 64.5 %");
        assert_eq!(explicit_overall_score(&doc), Some(64.5));
        assert_eq!(explicit_overall_score(&lines("no score")), None);
    }
}
