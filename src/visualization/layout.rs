//! Grouped bar geometry
//!
//! Values are joined on `(test name, byte size)` into a matrix instead of being
//! read off in row order, so a missing reading shows up as an empty cell rather
//! than shifting every following bar onto the wrong byte size.

use crate::aggregate::AggregatedDataset;
use crate::error::{ReportError, Result};
use std::collections::HashMap;
use std::ops::Range;

/// One drawable bar
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    /// Index into [`BarLayout::test_names`]
    pub series: usize,
    /// Index into [`BarLayout::byte_sizes`]
    pub size_index: usize,
    /// Left edge in chart units
    pub x0: f64,
    /// Right edge in chart units
    pub x1: f64,
    /// Mean wall clock time
    pub value: f64,
}

/// Positions of every bar and tick in a grouped bar chart
///
/// Byte size `j` owns the unit interval starting at `j`; inside it, test name
/// `i` is shifted right by `i * stride`.
#[derive(Debug, Clone)]
pub struct BarLayout {
    test_names: Vec<String>,
    byte_sizes: Vec<u64>,
    /// `values[name][size]`
    values: Vec<Vec<Option<f64>>>,
    bar_width: f64,
    stride: f64,
}

impl BarLayout {
    /// Build the value matrix from aggregated groups
    pub fn new(data: &AggregatedDataset, bar_width: f64, spacing: f64) -> Result<Self> {
        if data.is_empty() {
            return Err(ReportError::EmptyDataset("no groups to plot".to_string()));
        }

        let mut test_names: Vec<String> = Vec::new();
        let mut byte_sizes: Vec<u64> = Vec::new();
        let mut name_idx: HashMap<&str, usize> = HashMap::new();
        let mut size_idx: HashMap<u64, usize> = HashMap::new();

        for record in data.iter() {
            name_idx.entry(record.test_name.as_str()).or_insert_with(|| {
                test_names.push(record.test_name.clone());
                test_names.len() - 1
            });
            size_idx.entry(record.number_of_bytes).or_insert_with(|| {
                byte_sizes.push(record.number_of_bytes);
                byte_sizes.len() - 1
            });
        }

        let mut values = vec![vec![None; byte_sizes.len()]; test_names.len()];
        for record in data.iter() {
            let i = name_idx[record.test_name.as_str()];
            let j = size_idx[&record.number_of_bytes];
            values[i][j] = Some(record.wall_clock_us);
        }

        Ok(Self {
            test_names,
            byte_sizes,
            values,
            bar_width,
            stride: bar_width + spacing,
        })
    }

    /// Test names in first-occurrence order
    pub fn test_names(&self) -> &[String] {
        &self.test_names
    }

    /// Byte sizes in first-occurrence order
    pub fn byte_sizes(&self) -> &[u64] {
        &self.byte_sizes
    }

    /// Per byte size values of one test name, `None` if there is no such series
    pub fn series(&self, series: usize) -> Option<&[Option<f64>]> {
        self.values.get(series).map(Vec::as_slice)
    }

    /// Width of a single bar
    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Test names lacking a reading, with the byte sizes they lack
    pub fn missing(&self) -> Vec<(&str, Vec<u64>)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                let missing: Vec<u64> = row
                    .iter()
                    .zip(&self.byte_sizes)
                    .filter(|(v, _)| v.is_none())
                    .map(|(_, size)| *size)
                    .collect();
                (!missing.is_empty()).then(|| (self.test_names[i].as_str(), missing))
            })
            .collect()
    }

    /// Fail if any test name lacks a reading for some byte size
    pub fn ensure_aligned(&self) -> Result<()> {
        match self.missing().into_iter().next() {
            Some((test_name, missing)) => Err(ReportError::Alignment {
                test_name: test_name.to_string(),
                missing,
            }),
            None => Ok(()),
        }
    }

    /// Centre of the bar for a test name and byte size
    pub fn bar_center(&self, series: usize, size_index: usize) -> f64 {
        size_index as f64 + series as f64 * self.stride
    }

    /// Every bar that has a value; empty cells are skipped
    pub fn bars(&self) -> impl Iterator<Item = Bar> + '_ {
        self.values.iter().enumerate().flat_map(move |(i, row)| {
            row.iter().enumerate().filter_map(move |(j, value)| {
                value.map(|value| {
                    let center = self.bar_center(i, j);
                    Bar {
                        series: i,
                        size_index: j,
                        x0: center - self.bar_width / 2.0,
                        x1: center + self.bar_width / 2.0,
                        value,
                    }
                })
            })
        })
    }

    /// X tick at the centre of each byte size cluster, paired with its label value
    pub fn ticks(&self) -> Vec<(f64, u64)> {
        let offset = (self.test_names.len() as f64 - 1.0) / 2.0 * self.stride;
        self.byte_sizes
            .iter()
            .enumerate()
            .map(|(j, size)| (j as f64 + offset, *size))
            .collect()
    }

    /// Horizontal extent covering every bar with half a bar of margin
    pub fn x_range(&self) -> Range<f64> {
        let last = self.bar_center(self.test_names.len() - 1, self.byte_sizes.len() - 1);
        -self.bar_width..last + self.bar_width
    }

    /// Largest plotted value
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .flatten()
            .flatten()
            .copied()
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::dataset::{Dataset, Record};

    const EPS: f64 = 1e-9;

    fn layout(records: Vec<Record>) -> BarLayout {
        let agg = aggregate(&Dataset::from_records(records)).unwrap();
        BarLayout::new(&agg, 0.2, 0.01).unwrap()
    }

    fn full() -> BarLayout {
        layout(vec![
            Record::new("A", 100, 10.0),
            Record::new("A", 200, 20.0),
            Record::new("B", 100, 5.0),
            Record::new("B", 200, 7.0),
        ])
    }

    #[test]
    fn test_unique_values_first_seen_order() {
        let l = layout(vec![
            Record::new("B", 200, 1.0),
            Record::new("A", 100, 2.0),
            Record::new("A", 200, 3.0),
            Record::new("B", 100, 4.0),
        ]);
        assert_eq!(l.test_names(), &["B".to_string(), "A".to_string()]);
        assert_eq!(l.byte_sizes(), &[200, 100]);
    }

    #[test]
    fn test_values_keyed_not_positional() {
        // B reports sizes in the opposite order to A
        let l = layout(vec![
            Record::new("A", 100, 10.0),
            Record::new("A", 200, 20.0),
            Record::new("B", 200, 7.0),
            Record::new("B", 100, 5.0),
        ]);
        assert_eq!(l.series(1), Some(&[Some(5.0), Some(7.0)][..]));
        assert!(l.ensure_aligned().is_ok());
    }

    #[test]
    fn test_missing_reading_is_alignment_error() {
        let l = layout(vec![
            Record::new("A", 100, 10.0),
            Record::new("A", 200, 20.0),
            Record::new("B", 100, 5.0),
        ]);

        assert_eq!(l.series(1), Some(&[Some(5.0), None][..]));
        assert_eq!(l.missing(), vec![("B", vec![200])]);
        match l.ensure_aligned().unwrap_err() {
            ReportError::Alignment { test_name, missing } => {
                assert_eq!(test_name, "B");
                assert_eq!(missing, vec![200]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_series_out_of_range() {
        let l = full();
        assert_eq!(l.test_names().len(), 2);
        assert!(l.series(2).is_none());
        assert!(l.series(usize::MAX).is_none());
    }

    #[test]
    fn test_bars_skip_missing_cells() {
        let l = layout(vec![
            Record::new("A", 100, 10.0),
            Record::new("A", 200, 20.0),
            Record::new("B", 100, 5.0),
        ]);
        let bars: Vec<Bar> = l.bars().collect();
        assert_eq!(bars.len(), 3);
        assert!(!bars.iter().any(|b| b.series == 1 && b.size_index == 1));
    }

    #[test]
    fn test_bar_positions() {
        let l = full();
        let bars: Vec<Bar> = l.bars().collect();
        assert_eq!(bars.len(), 4);

        // A at size 200
        let a200 = &bars[1];
        assert!((a200.x0 - 0.9).abs() < EPS);
        assert!((a200.x1 - 1.1).abs() < EPS);
        assert_eq!(a200.value, 20.0);

        // B at size 100 sits one stride right of A
        let b100 = &bars[2];
        assert!((l.bar_center(1, 0) - 0.21).abs() < EPS);
        assert!((b100.x0 - 0.11).abs() < EPS);
        assert!((b100.x1 - 0.31).abs() < EPS);
    }

    #[test]
    fn test_ticks_centred_on_clusters() {
        let ticks = full().ticks();
        assert_eq!(ticks.len(), 2);
        assert!((ticks[0].0 - 0.105).abs() < EPS);
        assert!((ticks[1].0 - 1.105).abs() < EPS);
        assert_eq!(ticks[0].1, 100);
        assert_eq!(ticks[1].1, 200);
    }

    #[test]
    fn test_single_series_ticks_on_bars() {
        let l = layout(vec![Record::new("A", 64, 1.0), Record::new("A", 128, 2.0)]);
        let ticks = l.ticks();
        assert!((ticks[0].0 - 0.0).abs() < EPS);
        assert!((ticks[1].0 - 1.0).abs() < EPS);
    }

    #[test]
    fn test_ranges() {
        let l = full();
        let x = l.x_range();
        assert!((x.start + 0.2).abs() < EPS);
        assert!((x.end - 1.41).abs() < EPS);
        assert_eq!(l.max_value(), 20.0);
    }

    #[test]
    fn test_empty_groups() {
        let err = BarLayout::new(&AggregatedDataset::default(), 0.2, 0.01).unwrap_err();
        assert!(matches!(err, ReportError::EmptyDataset(_)));
    }
}
