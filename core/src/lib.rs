//! Core report types and shared scoring primitives.
//!
//! This crate defines the foundational types for summarizing cluster health
//! check reports:
//!
//! - [`Status`] and [`ColorTag`]: the five evaluation outcomes and the cell
//!   colors that encode them, tied together by one lookup table.
//! - [`Item`]: one evaluated check extracted from a report.
//! - [`Category`]: the five fixed reporting buckets and the alias table that
//!   maps free-form report categories onto them.
//! - [`ReportSummary`]: the serialized output consumed by the dashboard.
//! - [`ScoringPolicy`]: status weights and the neutral category score.
//!
//! Validation ([`validate_summary`], [`validate_policy`],
//! [`validate_report_file_name`]) catches structural problems such as
//! out-of-range scores, empty descriptions and unsupported upload types.
//!
//! # Example
//!
//! ```
//! use health_report_core::*;
//!
//! let status = ColorTag::from_hex("#ff0000").map(ColorTag::status);
//! assert_eq!(status, Some(Status::Required));
//!
//! let policy = ScoringPolicy::default();
//! assert_eq!(policy.weight(Status::Recommended), Some(50.0));
//! assert_eq!(policy.weight(Status::NotApplicable), None);
//!
//! assert_eq!(
//!     Category::from_item_category("Build/Deploy Security"),
//!     Some(Category::BuildSecurity)
//! );
//! assert!(is_valid_report_file("health-check.adoc"));
//! ```

mod policy;
mod types;
mod validate;

pub use policy::{DEFAULT_NEUTRAL_CATEGORY_SCORE, ScoringPolicy, StatusWeights};
pub use types::*;
pub use validate::{
    DEFAULT_MAX_FILE_SIZE, REPORT_EXTENSIONS, ValidationError, check_file_size,
    has_report_extension, is_valid_report_file, validate_policy, validate_report_file_name,
    validate_summary,
};
