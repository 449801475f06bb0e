//! YAML configuration for health check report summarization.
//!
//! A [`DashboardConfig`] carries the tunable parts of a deployment: the
//! [`ScoringPolicy`](health_report_core::ScoringPolicy) used by the score
//! calculator and the limits applied to uploaded reports before they are
//! parsed.
//!
//! # Quick start
//!
//! ```no_run
//! use health_report_config::DashboardConfig;
//!
//! let config = DashboardConfig::load("report-summary.yml").unwrap();
//! config.validate().unwrap();
//! println!("neutral score: {}", config.scoring.neutral_category_score);
//! ```

mod config;
mod error;

pub use config::{CONFIG_VERSION, DashboardConfig, InputConfig};
pub use error::{ConfigError, Result};
