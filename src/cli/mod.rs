//! CLI argument parsing and command handling

use crate::config::ReportConfig;
use crate::report::{Report, ReportGenerator};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

/// Bench Report - grouped wall clock charts from benchmark result files
#[derive(Parser, Debug)]
#[command(name = "bench-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Benchmark result file (CSV with "test name", "number of bytes", "wall clock us")
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Test name to leave out (repeatable); added to the default exclusions
    #[arg(short, long = "exclude", value_name = "TEST_NAME")]
    pub exclude: Vec<String>,

    /// Do not drop the built-in exclusions ("empms")
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Chart file; ".svg" writes SVG, anything else PNG
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON config file; flags override its values
    #[arg(short, long, env = "BENCH_REPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Draw the chart even if some test names lack readings for some sizes
    #[arg(long)]
    pub allow_gaps: bool,

    /// Export the aggregated table to CSV
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Export the aggregated table to JSON
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Export the aggregated table to Excel (.xlsx)
    #[arg(long, value_name = "PATH")]
    pub excel: Option<PathBuf>,

    /// Do not print the intermediate tables
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Merge the config file (if any) with the command line flags
    pub fn to_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)
                .with_context(|| format!("Failed to load config from: {}", path.display()))?,
            None => ReportConfig::default(),
        };

        if let Some(input) = &self.input {
            config.input_path = input.clone();
        }
        if let Some(output) = &self.output {
            config.output_path = output.clone();
        }
        if self.no_default_excludes {
            config.exclude.clear();
        }
        for name in &self.exclude {
            if !config.exclude.contains(name) {
                config.exclude.push(name.clone());
            }
        }
        if self.allow_gaps {
            config.allow_gaps = true;
        }
        if self.csv.is_some() {
            config.csv_out = self.csv.clone();
        }
        if self.json.is_some() {
            config.json_out = self.json.clone();
        }
        if self.excel.is_some() {
            config.excel_out = self.excel.clone();
        }

        Ok(config)
    }

    /// Generate the report based on CLI arguments
    pub fn run(&self) -> Result<()> {
        let config = self.to_config()?;

        tracing::info!("Starting bench-report");
        tracing::info!("Input: {}", config.input_path.display());
        tracing::info!("Excluded: {:?}", config.exclude);

        let generator = ReportGenerator::new(config).context("Invalid configuration")?;
        let input = generator.config().input_path.display().to_string();

        let report = generator
            .prepare()
            .with_context(|| format!("Failed to build report from: {}", input))?;

        if !self.quiet {
            self.print_tables(&report);
        }

        let output = generator.config().output_path.display().to_string();
        let chart = generator
            .render(&report.layout)
            .with_context(|| format!("Failed to draw chart: {}", output))?;
        println!("✓ Chart: {}", chart.display());

        let exports = generator
            .export(&report.aggregated)
            .context("Failed to export aggregated results")?;
        for path in exports {
            println!("✓ Exported: {}", path.display());
        }

        Ok(())
    }

    /// Print each stage's table
    fn print_tables(&self, report: &Report) {
        println!("{}", report.raw);
        println!("{}", report.filtered);
        println!("{}", report.aggregated);

        let layout = &report.layout;
        for (idx, name) in layout.test_names().iter().enumerate() {
            let Some(values) = layout.series(idx) else {
                continue;
            };
            println!("{}:", name);
            for (size, value) in layout.byte_sizes().iter().zip(values) {
                match value {
                    Some(v) => println!("  {:>12}  {:.3}", size, v),
                    None => println!("  {:>12}  (no data)", size),
                }
            }
        }
        println!();
    }
}
