//! Excel export functionality

use super::export_err;
use crate::aggregate::AggregatedDataset;
use crate::dataset::{NUMBER_OF_BYTES, TEST_NAME, WALL_CLOCK_US};
use crate::error::Result;
use rust_xlsxwriter::*;
use std::path::Path;

pub struct ExcelExporter;

impl ExcelExporter {
    /// Export the aggregated table to an Excel workbook
    pub fn export(data: &AggregatedDataset, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();

        let sheet = workbook.add_worksheet();
        sheet.set_name("Aggregated").map_err(export_err)?;
        Self::write_table(sheet, data).map_err(export_err)?;

        workbook.save(path).map_err(export_err)?;
        Ok(())
    }

    fn write_table(
        sheet: &mut Worksheet,
        data: &AggregatedDataset,
    ) -> std::result::Result<(), XlsxError> {
        let bold = Format::new().set_bold();
        let number_format = Format::new().set_num_format("0.00");

        let header = [TEST_NAME, NUMBER_OF_BYTES, WALL_CLOCK_US, "count"]
            .into_iter()
            .chain(data.metric_columns().iter().map(String::as_str));
        for (col, name) in header.enumerate() {
            sheet.write_with_format(0, col as u16, name, &bold)?;
        }

        for (idx, record) in data.iter().enumerate() {
            let row = idx as u32 + 1;
            sheet.write(row, 0, record.test_name.as_str())?;
            sheet.write(row, 1, record.number_of_bytes as f64)?;
            sheet.write_with_format(row, 2, record.wall_clock_us, &number_format)?;
            sheet.write(row, 3, record.count as f64)?;

            for (offset, value) in record.metrics.iter().enumerate() {
                if let Some(v) = value {
                    sheet.write_with_format(row, 4 + offset as u16, *v, &number_format)?;
                }
            }
        }

        sheet.set_column_width(0, 20)?;
        Ok(())
    }
}
