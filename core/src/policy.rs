//! Scoring policy: status weights and the neutral category score.
//!
//! The weights turn item statuses into a 0–100 health score. Both values
//! are loaded from the `scoring` section of the YAML configuration.

use serde::{Deserialize, Serialize};

use crate::Status;

/// Score substituted for a category whose score cannot be determined.
pub const DEFAULT_NEUTRAL_CATEGORY_SCORE: u8 = 75;

/// Weight contributed by each counted status.
///
/// `NotApplicable` has no weight: such items never enter a denominator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusWeights {
    pub required: f64,
    pub recommended: f64,
    pub advisory: f64,
    pub no_change: f64,
}

impl Default for StatusWeights {
    fn default() -> Self {
        Self {
            required: 0.0,
            recommended: 50.0,
            advisory: 80.0,
            no_change: 100.0,
        }
    }
}

/// Policy used by the score calculator.
///
/// # Examples
///
/// ```
/// use health_report_core::{ScoringPolicy, Status};
///
/// let policy = ScoringPolicy::default();
/// assert_eq!(policy.weight(Status::Required), Some(0.0));
/// assert_eq!(policy.weight(Status::NoChange), Some(100.0));
/// assert_eq!(policy.neutral_category_score, 75);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPolicy {
    pub weights: StatusWeights,
    pub neutral_category_score: u8,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            weights: StatusWeights::default(),
            neutral_category_score: DEFAULT_NEUTRAL_CATEGORY_SCORE,
        }
    }
}

impl ScoringPolicy {
    /// Returns the weight for `status`, or `None` for statuses excluded from
    /// scoring.
    pub fn weight(&self, status: Status) -> Option<f64> {
        match status {
            Status::Required => Some(self.weights.required),
            Status::Recommended => Some(self.weights.recommended),
            Status::Advisory => Some(self.weights.advisory),
            Status::NoChange => Some(self.weights.no_change),
            Status::NotApplicable => None,
        }
    }
}
