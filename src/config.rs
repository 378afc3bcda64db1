//! Report configuration
//!
//! Defaults reproduce the result file layout produced by the network benchmark
//! runs: one sender result file, the `empms` run excluded, a PNG next to it.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default benchmark result file
pub const DEFAULT_INPUT: &str = "results-sender-1Gb.result";

/// Default chart file
pub const DEFAULT_OUTPUT: &str = "results-sender-1Gb.png";

/// Test names dropped unless overridden
pub const DEFAULT_EXCLUDES: &[&str] = &["empms"];

/// Report configuration
///
/// Controls where data is read from, which test names are dropped, how the
/// grouped bars are laid out, and which optional exports are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Benchmark result file (CSV with header row)
    pub input_path: PathBuf,

    /// Test names removed before aggregation
    pub exclude: Vec<String>,

    /// Chart image path; `.svg` selects SVG output, anything else PNG
    pub output_path: PathBuf,

    /// Chart width in pixels
    pub width: u32,

    /// Chart height in pixels
    pub height: u32,

    /// Width of a single bar in x-axis units (one unit per byte size)
    pub bar_width: f64,

    /// Gap between neighbouring bars of the same byte size
    pub spacing: f64,

    /// Draw the chart even when some (test name, byte size) pairs have no reading
    pub allow_gaps: bool,

    /// Optional CSV export of the aggregated table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_out: Option<PathBuf>,

    /// Optional JSON export of the aggregated table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_out: Option<PathBuf>,

    /// Optional Excel export of the aggregated table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excel_out: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            exclude: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            width: 1200,
            height: 800,
            bar_width: 0.2,
            spacing: 0.01,
            allow_gaps: false,
            csv_out: None,
            json_out: None,
            excel_out: None,
        }
    }
}

impl ReportConfig {
    /// Create a config reading the given input file
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            ..Default::default()
        }
    }

    /// Load a config from a JSON file; missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            ReportError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Replace the exclusion set
    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the chart output path
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Allow missing (test name, byte size) readings
    pub fn with_allow_gaps(mut self, allow: bool) -> Self {
        self.allow_gaps = allow;
        self
    }

    /// Distance between the bars of neighbouring test names
    pub fn stride(&self) -> f64 {
        self.bar_width + self.spacing
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.input_path.as_os_str().is_empty() {
            return Err(ReportError::Config("input path must not be empty".into()));
        }

        if self.width == 0 || self.height == 0 {
            return Err(ReportError::Config(format!(
                "chart size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        if !self.bar_width.is_finite() || self.bar_width <= 0.0 {
            return Err(ReportError::Config(format!(
                "bar width must be positive, got {}",
                self.bar_width
            )));
        }

        if !self.spacing.is_finite() || self.spacing < 0.0 {
            return Err(ReportError::Config(format!(
                "spacing must not be negative, got {}",
                self.spacing
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ReportConfig::default();
        assert_eq!(config.input_path, PathBuf::from("results-sender-1Gb.result"));
        assert_eq!(config.exclude, vec!["empms".to_string()]);
        assert_eq!(config.bar_width, 0.2);
        assert_eq!(config.spacing, 0.01);
        assert!(!config.allow_gaps);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = ReportConfig::new("data.csv")
            .with_exclude(["a", "b"])
            .with_output("chart.svg")
            .with_allow_gaps(true);

        assert_eq!(config.input_path, PathBuf::from("data.csv"));
        assert_eq!(config.exclude, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(config.output_path, PathBuf::from("chart.svg"));
        assert!(config.allow_gaps);
    }

    #[test]
    fn test_stride() {
        let config = ReportConfig::default();
        assert!((config.stride() - 0.21).abs() < 1e-12);
    }

    #[test]
    fn test_config_validation_zero_size() {
        let config = ReportConfig {
            width: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ReportError::Config(_))));
    }

    #[test]
    fn test_config_validation_bad_bar_width() {
        for bar_width in [0.0, -1.0, f64::NAN] {
            let config = ReportConfig {
                bar_width,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_config_validation_negative_spacing() {
        let config = ReportConfig {
            spacing: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_input() {
        let config = ReportConfig::new("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file_partial() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"input_path": "other.result", "exclude": []}}"#).unwrap();

        let config = ReportConfig::from_file(file.path()).unwrap();
        assert_eq!(config.input_path, PathBuf::from("other.result"));
        assert!(config.exclude.is_empty());
        assert_eq!(config.width, 1200);
    }

    #[test]
    fn test_config_from_file_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ReportConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn test_config_serialization() {
        let config = ReportConfig::new("x.result").with_exclude(["skip"]);

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("csv_out"));
        let deserialized: ReportConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized, config);
    }
}
