//! Group-by-mean aggregation
//!
//! Rows are grouped by `(test name, number of bytes)` and every numeric column
//! is reduced to its unweighted arithmetic mean. Groups keep the order in which
//! they were first seen.

use crate::dataset::{self, Dataset, Record};
use crate::error::{ReportError, Result};
use std::collections::HashMap;
use std::fmt;

/// Mean values for one `(test name, number of bytes)` group
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedRecord {
    /// Benchmark scenario label
    pub test_name: String,
    /// Payload size shared by the group
    pub number_of_bytes: u64,
    /// Mean wall clock time in microseconds
    pub wall_clock_us: f64,
    /// Mean of each extra metric column; `None` when the group has no values
    pub metrics: Vec<Option<f64>>,
    /// Number of rows merged into this group
    pub count: usize,
}

/// One record per distinct `(test name, number of bytes)` pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedDataset {
    metric_columns: Vec<String>,
    records: Vec<AggregatedRecord>,
}

impl AggregatedDataset {
    /// Names of the extra numeric columns
    pub fn metric_columns(&self) -> &[String] {
        &self.metric_columns
    }

    /// Groups in first-seen order
    pub fn records(&self) -> &[AggregatedRecord] {
        &self.records
    }

    /// Get the number of groups
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if there are no groups
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get an iterator over the groups
    pub fn iter(&self) -> impl Iterator<Item = &AggregatedRecord> {
        self.records.iter()
    }

    /// Find the group for a test name and payload size
    pub fn get(&self, test_name: &str, number_of_bytes: u64) -> Option<&AggregatedRecord> {
        self.records
            .iter()
            .find(|r| r.test_name == test_name && r.number_of_bytes == number_of_bytes)
    }

    /// Turn the means back into plain rows, one per group
    pub fn to_dataset(&self) -> Dataset {
        let records = self
            .records
            .iter()
            .map(|r| Record {
                test_name: r.test_name.clone(),
                number_of_bytes: r.number_of_bytes,
                wall_clock_us: r.wall_clock_us,
                metrics: r.metrics.clone(),
            })
            .collect();
        Dataset::from_parts(self.metric_columns.clone(), records)
    }
}

impl fmt::Display for AggregatedDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut header = vec![
            dataset::TEST_NAME.to_string(),
            dataset::NUMBER_OF_BYTES.to_string(),
            dataset::WALL_CLOCK_US.to_string(),
        ];
        header.extend(self.metric_columns.iter().cloned());

        let rows = self.records.iter().map(|r| {
            let mut row = vec![
                r.test_name.clone(),
                r.number_of_bytes.to_string(),
                dataset::format_value(Some(r.wall_clock_us)),
            ];
            row.extend(r.metrics.iter().map(|m| dataset::format_value(*m)));
            row
        });

        dataset::write_table(f, &header, rows)
    }
}

/// Running sums for one group
struct Accumulator {
    test_name: String,
    number_of_bytes: u64,
    wall_clock_sum: f64,
    count: usize,
    metric_sums: Vec<(f64, usize)>,
}

impl Accumulator {
    fn new(record: &Record, metric_count: usize) -> Self {
        Self {
            test_name: record.test_name.clone(),
            number_of_bytes: record.number_of_bytes,
            wall_clock_sum: 0.0,
            count: 0,
            metric_sums: vec![(0.0, 0); metric_count],
        }
    }

    fn add(&mut self, record: &Record) {
        self.wall_clock_sum += record.wall_clock_us;
        self.count += 1;
        for (slot, value) in self.metric_sums.iter_mut().zip(&record.metrics) {
            if let Some(v) = value {
                slot.0 += v;
                slot.1 += 1;
            }
        }
    }

    fn finish(self) -> AggregatedRecord {
        AggregatedRecord {
            test_name: self.test_name,
            number_of_bytes: self.number_of_bytes,
            wall_clock_us: self.wall_clock_sum / self.count as f64,
            metrics: self
                .metric_sums
                .into_iter()
                .map(|(sum, n)| (n > 0).then(|| sum / n as f64))
                .collect(),
            count: self.count,
        }
    }
}

/// Group rows by `(test name, number of bytes)` and average every numeric column
pub fn aggregate(dataset: &Dataset) -> Result<AggregatedDataset> {
    if dataset.is_empty() {
        return Err(ReportError::EmptyDataset("no rows to aggregate".to_string()));
    }

    let metric_count = dataset.metric_columns().len();
    let mut index: HashMap<(&str, u64), usize> = HashMap::new();
    let mut groups: Vec<Accumulator> = Vec::new();

    for record in dataset.iter() {
        let key = (record.test_name.as_str(), record.number_of_bytes);
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(Accumulator::new(record, metric_count));
            groups.len() - 1
        });
        groups[slot].add(record);
    }

    tracing::debug!(rows = dataset.len(), groups = groups.len(), "aggregated rows");

    Ok(AggregatedDataset {
        metric_columns: dataset.metric_columns().to_vec(),
        records: groups.into_iter().map(Accumulator::finish).collect(),
    })
}
