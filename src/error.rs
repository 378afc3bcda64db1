//! Error types for bench-report

use std::path::PathBuf;
use thiserror::Error;

/// Report generation error
#[derive(Error, Debug)]
pub enum ReportError {
    /// Input file missing, unreadable or malformed
    #[error("failed to load {}: {reason}", path.display())]
    DataLoad {
        /// File that was being read
        path: PathBuf,
        /// What went wrong
        reason: String,
    },

    /// Nothing left to aggregate or plot
    #[error("empty dataset: {0}")]
    EmptyDataset(String),

    /// A test name has no reading for some byte sizes
    #[error("test '{test_name}' has no reading for byte sizes {missing:?}")]
    Alignment {
        /// Test name with the incomplete series
        test_name: String,
        /// Byte sizes with no aggregated reading
        missing: Vec<u64>,
    },

    /// A record's metric values do not line up with the metric columns
    #[error("record for '{test_name}' has {found} metric values, expected {expected}")]
    MetricCount {
        /// Test name of the offending record
        test_name: String,
        /// Number of metric columns
        expected: usize,
        /// Number of values the record carries
        found: usize,
    },

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Chart drawing failed
    #[error("render error: {0}")]
    Render(String),

    /// Writing an export file failed
    #[error("export error: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ReportError>;
