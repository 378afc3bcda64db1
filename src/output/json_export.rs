//! JSON export functionality

use super::export_err;
use crate::aggregate::AggregatedDataset;
use crate::error::Result;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::path::Path;

pub struct JsonExporter;

impl JsonExporter {
    /// Build the JSON document for the aggregated table
    pub fn to_value(data: &AggregatedDataset) -> Value {
        let groups: Vec<Value> = data
            .iter()
            .map(|r| {
                let metrics: Map<String, Value> = data
                    .metric_columns()
                    .iter()
                    .cloned()
                    .zip(r.metrics.iter().map(|m| json!(m)))
                    .collect();

                json!({
                    "test_name": r.test_name,
                    "number_of_bytes": r.number_of_bytes,
                    "wall_clock_us": r.wall_clock_us,
                    "count": r.count,
                    "metrics": metrics,
                })
            })
            .collect();

        json!({ "groups": groups })
    }

    /// Export the aggregated table to a JSON file
    pub fn export(data: &AggregatedDataset, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, &Self::to_value(data)).map_err(export_err)?;
        Ok(())
    }
}
