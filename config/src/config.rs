//! Deployment configuration for report summarization.
//!
//! # Example YAML
//!
//! ```yaml
//! version: "1.0"
//! scoring:
//!   weights:
//!     required: 0
//!     recommended: 50
//!     advisory: 80
//!     no_change: 100
//!   neutral_category_score: 75
//! input:
//!   allowed_extensions: [adoc, asciidoc]
//!   max_file_size: 10485760
//! ```
//!
//! Every section is optional; missing fields take the defaults shown above.

use std::io::{BufReader, BufWriter};
use std::path::Path;

use health_report_core::{
    DEFAULT_MAX_FILE_SIZE, REPORT_EXTENSIONS, ScoringPolicy, has_report_extension,
    validate_policy,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Format version written by [`DashboardConfig::default`].
pub const CONFIG_VERSION: &str = "1.0";

/// Limits applied to report files before parsing.
///
/// # Examples
///
/// ```
/// # use health_report_config::InputConfig;
/// let input = InputConfig::default();
/// assert!(input.accepts("cluster.ADOC"));
/// assert!(!input.accepts("cluster.pdf"));
/// assert_eq!(input.max_file_size, 10 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Accepted extensions, without the leading dot.
    pub allowed_extensions: Vec<String>,
    /// Largest accepted file, in bytes.
    pub max_file_size: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: REPORT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl InputConfig {
    /// Allowed extensions with any leading dot removed.
    pub fn extensions(&self) -> Vec<&str> {
        self.allowed_extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.'))
            .filter(|ext| !ext.is_empty())
            .collect()
    }

    /// Returns `true` if `file_name` carries an allowed extension.
    pub fn accepts(&self, file_name: &str) -> bool {
        has_report_extension(file_name, &self.extensions())
    }
}

/// Top-level configuration.
///
/// Loaded from a YAML file (typically `report-summary.yml`) by the CLI's
/// `--config` option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Configuration format version (e.g., `"1.0"`).
    pub version: String,
    /// Status weights and the neutral category score.
    pub scoring: ScoringPolicy,
    /// Upload limits.
    pub input: InputConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            scoring: ScoringPolicy::default(),
            input: InputConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::ConfigError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::ConfigError::YamlError) if parsing
    /// fails. The loaded values are not validated; call
    /// [`validate`](Self::validate) before use.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Checks that the scoring policy and input limits are usable.
    ///
    /// # Examples
    ///
    /// ```
    /// use health_report_config::{ConfigError, DashboardConfig};
    ///
    /// let mut config = DashboardConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.scoring.weights.required = -5.0;
    /// assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    /// ```
    pub fn validate(&self) -> Result<()> {
        let problems = validate_policy(&self.scoring);
        if !problems.is_empty() {
            return Err(ConfigError::Invalid(problems));
        }
        if self.input.extensions().is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_report_core::Status;

    fn sample_yaml() -> &'static str {
        r#"
version: "1.0"
scoring:
  weights:
    required: 10
    recommended: 40
    advisory: 70
    no_change: 100
  neutral_category_score: 60
input:
  allowed_extensions:
    - .adoc
    - txt
  max_file_size: 2048
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: DashboardConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.scoring.weight(Status::Required), Some(10.0));
        assert_eq!(config.scoring.neutral_category_score, 60);
        assert_eq!(config.input.max_file_size, 2048);
        assert_eq!(config.input.extensions(), vec!["adoc", "txt"]);
        assert!(config.input.accepts("notes.txt"));
    }

    #[test]
    fn test_deserialize_minimal_uses_defaults() {
        let config: DashboardConfig = serde_yaml::from_str("version: \"1.0\"\n").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_partial_scoring_section() {
        let yaml = "scoring:\n  neutral_category_score: 50\n";
        let config: DashboardConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scoring.neutral_category_score, 50);
        assert_eq!(config.scoring.weight(Status::Advisory), Some(80.0));
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn test_validate_rejects_bad_weights() {
        let mut config = DashboardConfig::default();
        config.scoring.weights.advisory = 150.0;
        config.scoring.neutral_category_score = 101;
        let Err(ConfigError::Invalid(problems)) = config.validate() else {
            panic!("expected invalid config");
        };
        assert_eq!(problems.len(), 2);
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = DashboardConfig::default();
        config.input.allowed_extensions = vec![".".to_string(), " ".to_string()];
        assert!(matches!(config.validate(), Err(ConfigError::NoExtensions)));
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report-summary.yml");

        let original: DashboardConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = DashboardConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file() {
        let err = DashboardConfig::load("/nonexistent/report-summary.yml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
