//! Report type definitions for health check summaries.
//!
//! This module defines the data model shared by the extraction engine and
//! its callers. The types are designed for serialization with [`serde`];
//! [`ReportSummary`] uses camelCase field names because it is consumed
//! directly by the dashboard front end.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Cluster name used when no pattern in the report yields one.
pub const DEFAULT_CLUSTER_NAME: &str = "OpenShift Cluster";

/// Customer name used when no pattern in the report yields one.
pub const DEFAULT_CUSTOMER_NAME: &str = "Your Company";

/// Evaluation outcome of one health check item.
///
/// # Examples
///
/// ```
/// use health_report_core::Status;
///
/// assert_eq!(Status::NoChange.label(), "No Change");
/// assert!(Status::Advisory.is_counted());
/// assert!(!Status::NotApplicable.is_counted());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Changes are required (red).
    Required,
    /// Changes are recommended (yellow).
    Recommended,
    /// Advisory information only (light blue).
    Advisory,
    /// No change needed (green).
    NoChange,
    /// The check does not apply to this environment (gray).
    NotApplicable,
}

impl Status {
    /// All statuses in severity order.
    pub const ALL: [Status; 5] = [
        Status::Required,
        Status::Recommended,
        Status::Advisory,
        Status::NoChange,
        Status::NotApplicable,
    ];

    /// Human-readable label, also used for placeholder item names.
    pub fn label(self) -> &'static str {
        match self {
            Self::Required => "Required",
            Self::Recommended => "Recommended",
            Self::Advisory => "Advisory",
            Self::NoChange => "No Change",
            Self::NotApplicable => "Not Applicable",
        }
    }

    /// Returns `true` if the status participates in score denominators.
    pub fn is_counted(self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cell background color used by reports to mark an evaluation result.
///
/// Reports encode the status of each row with an AsciiDoc attribute such as
/// `{set:cellbgcolor:#FF0000}`. [`ColorTag::from_hex`] resolves the hex code
/// through the canonical table; any code outside the palette is unresolvable.
///
/// # Examples
///
/// ```
/// use health_report_core::{ColorTag, Status};
///
/// assert_eq!(ColorTag::from_hex("#80e5ff"), Some(ColorTag::LightBlue));
/// assert_eq!(ColorTag::LightBlue.status(), Status::Advisory);
/// assert_eq!(ColorTag::from_hex("#FFFFFF"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTag {
    Red,
    Yellow,
    LightBlue,
    Green,
    Gray,
}

/// Canonical color → status table. Every consumer resolves tags through it.
const COLOR_TABLE: [(ColorTag, &str, Status); 5] = [
    (ColorTag::Red, "#FF0000", Status::Required),
    (ColorTag::Yellow, "#FEFE20", Status::Recommended),
    (ColorTag::LightBlue, "#80E5FF", Status::Advisory),
    (ColorTag::Green, "#00FF00", Status::NoChange),
    (ColorTag::Gray, "#A6B9BF", Status::NotApplicable),
];

impl ColorTag {
    /// Resolves a hex code (case-insensitive, leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let trimmed = hex.trim().trim_start_matches('#');
        COLOR_TABLE
            .iter()
            .find(|(_, code, _)| code[1..].eq_ignore_ascii_case(trimmed))
            .map(|(tag, _, _)| *tag)
    }

    /// Returns the canonical uppercase hex code, including the leading `#`.
    pub fn hex(self) -> &'static str {
        COLOR_TABLE
            .iter()
            .find(|(tag, _, _)| *tag == self)
            .map_or("", |(_, code, _)| *code)
    }

    /// Returns the status encoded by this color.
    pub fn status(self) -> Status {
        COLOR_TABLE
            .iter()
            .find(|(tag, _, _)| *tag == self)
            .map_or(Status::NotApplicable, |(_, _, status)| *status)
    }

    /// Phrases that mark a row carrying this color as part of the legend.
    pub fn legend_phrases(self) -> &'static [&'static str] {
        match self {
            Self::Red => &["Indicates Changes Required"],
            Self::Yellow => &["Indicates Changes Recommended"],
            Self::LightBlue => &["No change required or recommended", "No advise given"],
            Self::Green => &["No change required"],
            Self::Gray => &["No advise given", "Not applicable to this environment"],
        }
    }
}

/// One evaluated check extracted from a report.
///
/// Items only exist with a resolved [`Status`]; rows whose color cannot be
/// resolved are discarded during extraction.
///
/// # Examples
///
/// ```
/// use health_report_core::{ColorTag, Item};
///
/// let item = Item::new("KubeadminUser", ColorTag::Red)
///     .with_observation("kubeadmin account still present");
/// assert_eq!(item.summary_line(), "KubeadminUser: kubeadmin account still present");
///
/// let bare = Item::new("EtcdBackup", ColorTag::Yellow);
/// assert_eq!(bare.summary_line(), "EtcdBackup");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Free-form category cell text (empty when the report gives none).
    pub category: String,
    /// Name from the item's cross-reference token.
    pub name: String,
    /// Observed result text.
    pub observation: String,
    /// Resolved evaluation outcome.
    pub status: Status,
    /// Raw color tag, retained for diagnostics.
    pub color: ColorTag,
}

impl Item {
    /// Creates an item whose status is derived from `color`.
    pub fn new(name: impl Into<String>, color: ColorTag) -> Self {
        Self {
            category: String::new(),
            name: name.into(),
            observation: String::new(),
            status: color.status(),
            color,
        }
    }

    /// Sets the observation text.
    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observation = observation.into();
        self
    }

    /// Sets the category cell text.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Formats the item as `"name: observation"`, or just the name when no
    /// observation was found.
    pub fn summary_line(&self) -> String {
        if self.observation.is_empty() {
            self.name.clone()
        } else {
            format!("{}: {}", self.name, self.observation)
        }
    }

    /// Returns the reporting bucket for this item's category, if any.
    pub fn bucket(&self) -> Option<Category> {
        Category::from_item_category(&self.category)
    }
}

/// Fixed reporting category shown on the dashboard.
///
/// # Examples
///
/// ```
/// use health_report_core::Category;
///
/// assert_eq!(Category::Monitoring.heading(), "Central Monitoring");
/// assert_eq!(Category::from_item_category("Networking"), Some(Category::Infrastructure));
/// assert_eq!(Category::from_item_category("Op-Ready"), Some(Category::Monitoring));
/// assert_eq!(Category::from_item_category("Miscellaneous"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Infrastructure,
    Governance,
    Compliance,
    Monitoring,
    BuildSecurity,
}

/// Alias table mapping normalized category words onto buckets.
///
/// Entries are matched as whole-word phrases in order, so more specific
/// aliases must come before broader ones ("build deploy security" before
/// "security").
const CATEGORY_ALIASES: &[(&str, Category)] = &[
    ("infrastructure setup", Category::Infrastructure),
    ("policy governance", Category::Governance),
    ("compliance benchmarking", Category::Compliance),
    ("central monitoring", Category::Monitoring),
    ("build deploy security", Category::BuildSecurity),
    ("build", Category::BuildSecurity),
    ("deploy", Category::BuildSecurity),
    ("deployment", Category::BuildSecurity),
    ("pipeline", Category::BuildSecurity),
    ("image", Category::BuildSecurity),
    ("images", Category::BuildSecurity),
    ("registry", Category::BuildSecurity),
    ("applications", Category::BuildSecurity),
    ("application", Category::BuildSecurity),
    ("compliance", Category::Compliance),
    ("benchmark", Category::Compliance),
    ("benchmarking", Category::Compliance),
    ("cis", Category::Compliance),
    ("audit", Category::Compliance),
    ("security", Category::Compliance),
    ("monitoring", Category::Monitoring),
    ("logging", Category::Monitoring),
    ("alerting", Category::Monitoring),
    ("observability", Category::Monitoring),
    ("metrics", Category::Monitoring),
    ("op ready", Category::Monitoring),
    ("governance", Category::Governance),
    ("policy", Category::Governance),
    ("policies", Category::Governance),
    ("rbac", Category::Governance),
    ("identity", Category::Governance),
    ("authentication", Category::Governance),
    ("access control", Category::Governance),
    ("quota", Category::Governance),
    ("quotas", Category::Governance),
    ("infrastructure", Category::Infrastructure),
    ("infra", Category::Infrastructure),
    ("cluster config", Category::Infrastructure),
    ("cluster configuration", Category::Infrastructure),
    ("networking", Category::Infrastructure),
    ("network", Category::Infrastructure),
    ("storage", Category::Infrastructure),
    ("etcd", Category::Infrastructure),
    ("nodes", Category::Infrastructure),
    ("node", Category::Infrastructure),
    ("installation", Category::Infrastructure),
    ("platform", Category::Infrastructure),
];

impl Category {
    /// All categories in dashboard order.
    pub const ALL: [Category; 5] = [
        Category::Infrastructure,
        Category::Governance,
        Category::Compliance,
        Category::Monitoring,
        Category::BuildSecurity,
    ];

    /// Heading text used for this category in authored reports.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastructure Setup",
            Self::Governance => "Policy Governance",
            Self::Compliance => "Compliance Benchmarking",
            Self::Monitoring => "Central Monitoring",
            Self::BuildSecurity => "Build/Deploy Security",
        }
    }

    /// Short name used in generated descriptions.
    pub fn label(self) -> &'static str {
        match self {
            Self::Infrastructure => "Infrastructure",
            Self::Governance => "Policy Governance",
            Self::Compliance => "Compliance",
            Self::Monitoring => "Monitoring",
            Self::BuildSecurity => "Build/Deploy Security",
        }
    }

    /// Maps a free-form category cell onto a reporting bucket.
    pub fn from_item_category(name: &str) -> Option<Self> {
        let normalized = normalize_words(name);
        if normalized.is_empty() {
            return None;
        }
        let padded = format!(" {normalized} ");
        CATEGORY_ALIASES
            .iter()
            .find(|(alias, _)| padded.contains(&format!(" {alias} ")))
            .map(|(_, category)| *category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Lowercases and collapses every run of non-alphanumeric characters into a
/// single space.
fn normalize_words(text: &str) -> String {
    text.to_lowercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Structured summary of one health check report.
///
/// This is the single output of the extraction engine. Item lists are always
/// present (empty rather than null) and every score is within `0..=100`.
///
/// # Examples
///
/// ```
/// use health_report_core::{Category, ReportSummary};
///
/// let mut summary = ReportSummary::default();
/// summary.set_category(Category::Compliance, 82, "Compliance is well-configured.");
/// assert_eq!(summary.category_score(Category::Compliance), 82);
///
/// let json = serde_json::to_value(&summary).unwrap();
/// assert_eq!(json["scoreCompliance"], 82);
/// assert!(json["itemsRequired"].as_array().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub cluster_name: String,
    pub customer_name: String,
    pub overall_score: f64,
    pub score_infra: u8,
    pub score_governance: u8,
    pub score_compliance: u8,
    pub score_monitoring: u8,
    pub score_build_security: u8,
    pub infra_description: String,
    pub governance_description: String,
    pub compliance_description: String,
    pub monitoring_description: String,
    pub build_security_description: String,
    pub items_required: Vec<String>,
    pub items_recommended: Vec<String>,
    pub items_advisory: Vec<String>,
    pub no_change_count: u32,
    pub not_applicable_count: u32,
}

impl ReportSummary {
    /// Returns the score field for `category`.
    pub fn category_score(&self, category: Category) -> u8 {
        match category {
            Category::Infrastructure => self.score_infra,
            Category::Governance => self.score_governance,
            Category::Compliance => self.score_compliance,
            Category::Monitoring => self.score_monitoring,
            Category::BuildSecurity => self.score_build_security,
        }
    }

    /// Returns the description field for `category`.
    pub fn category_description(&self, category: Category) -> &str {
        match category {
            Category::Infrastructure => &self.infra_description,
            Category::Governance => &self.governance_description,
            Category::Compliance => &self.compliance_description,
            Category::Monitoring => &self.monitoring_description,
            Category::BuildSecurity => &self.build_security_description,
        }
    }

    /// Sets the score and description fields for `category`.
    pub fn set_category(&mut self, category: Category, score: u8, description: impl Into<String>) {
        let description = description.into();
        let (score_field, description_field) = match category {
            Category::Infrastructure => (&mut self.score_infra, &mut self.infra_description),
            Category::Governance => (&mut self.score_governance, &mut self.governance_description),
            Category::Compliance => (&mut self.score_compliance, &mut self.compliance_description),
            Category::Monitoring => (&mut self.score_monitoring, &mut self.monitoring_description),
            Category::BuildSecurity => (
                &mut self.score_build_security,
                &mut self.build_security_description,
            ),
        };
        *score_field = score;
        *description_field = description;
    }

    /// Returns the action-item list for `status`, if the summary keeps one.
    pub fn items_for(&self, status: Status) -> Option<&[String]> {
        match status {
            Status::Required => Some(&self.items_required),
            Status::Recommended => Some(&self.items_recommended),
            Status::Advisory => Some(&self.items_advisory),
            Status::NoChange | Status::NotApplicable => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_table_round_trips_hex() {
        for (tag, hex, status) in COLOR_TABLE {
            assert_eq!(ColorTag::from_hex(hex), Some(tag));
            assert_eq!(tag.hex(), hex);
            assert_eq!(tag.status(), status);
        }
    }

    #[test]
    fn test_color_from_hex_is_case_insensitive() {
        assert_eq!(ColorTag::from_hex("#fefe20"), Some(ColorTag::Yellow));
        assert_eq!(ColorTag::from_hex("a6b9bf"), Some(ColorTag::Gray));
        assert_eq!(ColorTag::from_hex("#FFFFFF"), None);
        assert_eq!(ColorTag::from_hex(""), None);
    }

    #[test]
    fn test_category_aliases_prefer_specific_phrases() {
        assert_eq!(
            Category::from_item_category("Build/Deploy Security"),
            Some(Category::BuildSecurity)
        );
        assert_eq!(
            Category::from_item_category("Security"),
            Some(Category::Compliance)
        );
        assert_eq!(
            Category::from_item_category("Cluster Config"),
            Some(Category::Infrastructure)
        );
        assert_eq!(
            Category::from_item_category("RBAC"),
            Some(Category::Governance)
        );
    }

    #[test]
    fn test_category_aliases_match_whole_words_only() {
        assert_eq!(Category::from_item_category("Decision log"), None);
        assert_eq!(Category::from_item_category(""), None);
        assert_eq!(Category::from_item_category("  --  "), None);
    }

    #[test]
    fn test_every_heading_maps_to_its_category() {
        for category in Category::ALL {
            assert_eq!(Category::from_item_category(category.heading()), Some(category));
        }
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = ReportSummary {
            cluster_name: "prod".to_string(),
            not_applicable_count: 2,
            ..ReportSummary::default()
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["clusterName"], "prod");
        assert_eq!(json["notApplicableCount"], 2);
        assert_eq!(json["buildSecurityDescription"], "");
        assert!(json["itemsAdvisory"].is_array());
    }

    #[test]
    fn test_set_category_updates_matching_fields() {
        let mut summary = ReportSummary::default();
        summary.set_category(Category::BuildSecurity, 64, "needs attention");
        assert_eq!(summary.score_build_security, 64);
        assert_eq!(summary.build_security_description, "needs attention");
        assert_eq!(summary.category_description(Category::Infrastructure), "");
    }
}
