//! CSV export functionality

use super::export_err;
use crate::aggregate::AggregatedDataset;
use crate::dataset::{NUMBER_OF_BYTES, TEST_NAME, WALL_CLOCK_US};
use crate::error::Result;
use csv::Writer;
use std::fs::File;
use std::path::Path;

pub struct CsvExporter;

impl CsvExporter {
    /// Export the aggregated table to a CSV file readable by the loader
    pub fn export(data: &AggregatedDataset, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut wtr = Writer::from_writer(file);

        // Write headers
        let mut header = vec![TEST_NAME, NUMBER_OF_BYTES, WALL_CLOCK_US];
        header.extend(data.metric_columns().iter().map(String::as_str));
        wtr.write_record(&header).map_err(export_err)?;

        // Write data rows
        for record in data.iter() {
            let mut row = vec![
                record.test_name.clone(),
                record.number_of_bytes.to_string(),
                record.wall_clock_us.to_string(),
            ];
            row.extend(
                record
                    .metrics
                    .iter()
                    .map(|m| m.map(|v| v.to_string()).unwrap_or_default()),
            );
            wtr.write_record(&row).map_err(export_err)?;
        }

        wtr.flush()?;
        Ok(())
    }
}
