//! Benchmark result records
//!
//! A [`Dataset`] is the in-memory form of one result file: every row keeps its
//! test name, payload size and wall clock time, plus whatever extra numeric
//! columns the file carried.

mod loader;

pub use loader::{load, load_from_reader};

use crate::error::{ReportError, Result};
use std::collections::HashSet;
use std::fmt;

/// Test name column header
pub const TEST_NAME: &str = "test name";

/// Payload size column header
pub const NUMBER_OF_BYTES: &str = "number of bytes";

/// Wall clock column header
pub const WALL_CLOCK_US: &str = "wall clock us";

/// One measurement row
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Benchmark scenario label
    pub test_name: String,
    /// Payload size of the measurement
    pub number_of_bytes: u64,
    /// Elapsed real time in microseconds
    pub wall_clock_us: f64,
    /// Extra numeric columns, indexed like [`Dataset::metric_columns`]
    pub metrics: Vec<Option<f64>>,
}

impl Record {
    /// Create a record without extra metrics
    pub fn new(test_name: impl Into<String>, number_of_bytes: u64, wall_clock_us: f64) -> Self {
        Self {
            test_name: test_name.into(),
            number_of_bytes,
            wall_clock_us,
            metrics: Vec::new(),
        }
    }

    /// Attach extra metric values
    pub fn with_metrics(mut self, metrics: Vec<Option<f64>>) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Ordered collection of records sharing one set of metric columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    metric_columns: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    /// Create a dataset; every record must carry one value slot per metric column
    pub fn new(metric_columns: Vec<String>, records: Vec<Record>) -> Result<Self> {
        if let Some(bad) = records
            .iter()
            .find(|r| r.metrics.len() != metric_columns.len())
        {
            return Err(ReportError::MetricCount {
                test_name: bad.test_name.clone(),
                expected: metric_columns.len(),
                found: bad.metrics.len(),
            });
        }
        Ok(Self::from_parts(metric_columns, records))
    }

    /// Create a dataset with only the three required columns; metric values
    /// carried by the records are dropped
    pub fn from_records(records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .map(|r| r.with_metrics(Vec::new()))
            .collect();
        Self::from_parts(Vec::new(), records)
    }

    /// Caller guarantees every record has one slot per metric column
    pub(crate) fn from_parts(metric_columns: Vec<String>, records: Vec<Record>) -> Self {
        Self {
            metric_columns,
            records,
        }
    }

    /// Names of the extra numeric columns
    pub fn metric_columns(&self) -> &[String] {
        &self.metric_columns
    }

    /// All records in file order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Get the number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the dataset has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get an iterator over the records
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Drop every record whose test name is in `names`, keeping the order of the rest
    pub fn exclude<S: AsRef<str>>(&self, names: &[S]) -> Dataset {
        if names.is_empty() {
            return self.clone();
        }

        let skip: HashSet<&str> = names.iter().map(|s| s.as_ref()).collect();
        let records = self
            .records
            .iter()
            .filter(|r| !skip.contains(r.test_name.as_str()))
            .cloned()
            .collect();

        Dataset {
            metric_columns: self.metric_columns.clone(),
            records,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec![
            TEST_NAME.to_string(),
            NUMBER_OF_BYTES.to_string(),
            WALL_CLOCK_US.to_string(),
        ];
        header.extend(self.metric_columns.iter().cloned());

        let rows = self.records.iter().map(|r| {
            let mut row = vec![
                r.test_name.clone(),
                r.number_of_bytes.to_string(),
                format_value(Some(r.wall_clock_us)),
            ];
            row.extend(r.metrics.iter().map(|m| format_value(*m)));
            row
        });

        write_table(f, &header, rows)
    }
}

/// Format a numeric cell; missing values print as `NaN` like the result files do
pub(crate) fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{:.0}", v),
        Some(v) => format!("{:.3}", v),
        None => "NaN".to_string(),
    }
}

/// Write a right-aligned text table with a leading row index column
pub(crate) fn write_table<I>(f: &mut fmt::Formatter<'_>, header: &[String], rows: I) -> fmt::Result
where
    I: IntoIterator<Item = Vec<String>>,
{
    let rows: Vec<Vec<String>> = rows.into_iter().collect();
    let index_width = rows.len().saturating_sub(1).to_string().len();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(col, h)| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write!(f, "{:index_width$}", "")?;
    for (h, w) in header.iter().zip(&widths) {
        write!(f, "  {:>w$}", h, w = *w)?;
    }
    writeln!(f)?;

    for (idx, row) in rows.iter().enumerate() {
        write!(f, "{:>index_width$}", idx)?;
        for (cell, w) in row.iter().zip(&widths) {
            write!(f, "  {:>w$}", cell, w = *w)?;
        }
        writeln!(f)?;
    }

    if rows.is_empty() {
        writeln!(f, "[0 rows]")?;
    }

    Ok(())
}
