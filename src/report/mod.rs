//! Report generation pipeline
//!
//! [`ReportGenerator`] runs the four stages in order: load the result file,
//! drop excluded test names, average each `(test name, number of bytes)`
//! group, then lay out and draw the grouped bar chart. Any failure ends the
//! run; nothing is retried.

use crate::aggregate::{aggregate, AggregatedDataset};
use crate::config::ReportConfig;
use crate::dataset::{self, Dataset};
use crate::error::{ReportError, Result};
use crate::output::{CsvExporter, ExcelExporter, JsonExporter};
use crate::visualization::{BarChartPlotter, BarLayout};
use std::path::PathBuf;


/// Everything produced by one run
#[derive(Debug, Clone)]
pub struct Report {
    /// Rows as read from the input file
    pub raw: Dataset,
    /// Rows left after exclusion
    pub filtered: Dataset,
    /// One row per `(test name, number of bytes)` group
    pub aggregated: AggregatedDataset,
    /// Bar geometry used for the chart
    pub layout: BarLayout,
    /// Files written by the run, chart first
    pub written: Vec<PathBuf>,
}

/// Load, filter, aggregate and render one benchmark result file
pub struct ReportGenerator {
    config: ReportConfig,
}

impl ReportGenerator {
    /// Create a generator after validating the config
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Read the configured input file
    pub fn load(&self) -> Result<Dataset> {
        let data = dataset::load(&self.config.input_path)?;
        tracing::info!(
            path = %self.config.input_path.display(),
            rows = data.len(),
            "loaded benchmark results"
        );

        if data.is_empty() {
            return Err(ReportError::EmptyDataset(format!(
                "{} contains no rows",
                self.config.input_path.display()
            )));
        }
        Ok(data)
    }

    /// Drop rows whose test name is excluded
    pub fn filter(&self, data: &Dataset) -> Result<Dataset> {
        let filtered = data.exclude(&self.config.exclude);
        tracing::info!(
            excluded = ?self.config.exclude,
            dropped = data.len() - filtered.len(),
            remaining = filtered.len(),
            "filtered test names"
        );

        if filtered.is_empty() {
            return Err(ReportError::EmptyDataset("every row was excluded".to_string()));
        }
        Ok(filtered)
    }

    /// Average each `(test name, number of bytes)` group
    pub fn aggregate(&self, data: &Dataset) -> Result<AggregatedDataset> {
        let aggregated = aggregate(data)?;
        tracing::info!(groups = aggregated.len(), "aggregated groups");
        Ok(aggregated)
    }

    /// Compute bar positions, enforcing one reading per test name and byte size
    /// unless gaps are allowed
    pub fn layout(&self, data: &AggregatedDataset) -> Result<BarLayout> {
        let layout = BarLayout::new(data, self.config.bar_width, self.config.spacing)?;

        if self.config.allow_gaps {
            for (test_name, missing) in layout.missing() {
                tracing::warn!(test_name, ?missing, "no reading, leaving bars empty");
            }
        } else {
            layout.ensure_aligned()?;
        }

        Ok(layout)
    }

    /// Draw the chart to the configured output path
    pub fn render(&self, layout: &BarLayout) -> Result<PathBuf> {
        let path = &self.config.output_path;
        BarChartPlotter::plot(layout, path, (self.config.width, self.config.height))?;
        tracing::info!(
            path = %path.display(),
            test_names = layout.test_names().len(),
            byte_sizes = layout.byte_sizes().len(),
            "chart written"
        );
        Ok(path.clone())
    }

    /// Write the configured exports of the aggregated table
    pub fn export(&self, data: &AggregatedDataset) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        if let Some(path) = &self.config.csv_out {
            CsvExporter::export(data, path)?;
            written.push(path.clone());
        }

        if let Some(path) = &self.config.json_out {
            JsonExporter::export(data, path)?;
            written.push(path.clone());
        }

        if let Some(path) = &self.config.excel_out {
            ExcelExporter::export(data, path)?;
            written.push(path.clone());
        }

        for path in &written {
            tracing::info!(path = %path.display(), "export written");
        }
        Ok(written)
    }

    /// Run every stage up to, but not including, drawing
    pub fn prepare(&self) -> Result<Report> {
        let raw = self.load()?;
        let filtered = self.filter(&raw)?;
        let aggregated = self.aggregate(&filtered)?;
        let layout = self.layout(&aggregated)?;

        Ok(Report {
            raw,
            filtered,
            aggregated,
            layout,
            written: Vec::new(),
        })
    }

    /// Run the whole pipeline, writing the chart and any exports
    pub fn run(&self) -> Result<Report> {
        let mut report = self.prepare()?;

        report.written.push(self.render(&report.layout)?);
        let exports = self.export(&report.aggregated)?;
        report.written.extend(exports);

        Ok(report)
    }
}
