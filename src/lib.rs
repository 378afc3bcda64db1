//! Bench Report - grouped wall clock charts from benchmark result files
//!
//! This library loads benchmark result files (CSV with `test name`,
//! `number of bytes` and `wall clock us` columns), averages repeated runs and
//! draws one cluster of bars per payload size with one bar per test name.
//!
//! # Architecture
//!
//! - **Dataset**: result file loading and test name exclusion
//! - **Aggregate**: group-by-mean over `(test name, number of bytes)`
//! - **Visualization**: keyed bar layout and plotters rendering
//! - **Output**: CSV, JSON and Excel exports of the aggregated table
//! - **Report**: runs the stages in order
//!
//! # Example
//!
//! ```rust,no_run
//! use bench_report::{ReportConfig, ReportGenerator};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ReportConfig::new("results-sender-1Gb.result")
//!         .with_exclude(["empms"])
//!         .with_output("wall_clock.png");
//!
//!     let report = ReportGenerator::new(config)?.run()?;
//!     println!("{}", report.aggregated);
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod output;
pub mod report;
pub mod visualization;

// Re-export commonly used types
pub use aggregate::{aggregate, AggregatedDataset, AggregatedRecord};
pub use config::ReportConfig;
pub use dataset::{Dataset, Record};
pub use error::{ReportError, Result};
pub use output::{CsvExporter, ExcelExporter, JsonExporter};
pub use report::{Report, ReportGenerator};
pub use visualization::{BarChartPlotter, BarLayout};
