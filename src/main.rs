//! Bench Report CLI
//!
//! Turns a benchmark result file into a grouped wall clock bar chart.

use anyhow::Result;
use bench_report::cli::Cli;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Generate the report
    cli.run()?;

    Ok(())
}
