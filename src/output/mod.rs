//! Output formats for aggregated results

pub mod csv_export;
pub mod excel;
pub mod json_export;

pub use csv_export::CsvExporter;
pub use excel::ExcelExporter;
pub use json_export::JsonExporter;

use crate::error::ReportError;

fn export_err(e: impl std::fmt::Display) -> ReportError {
    ReportError::Export(e.to_string())
}
