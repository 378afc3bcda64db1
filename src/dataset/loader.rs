//! CSV result file loading

use super::{Dataset, Record, NUMBER_OF_BYTES, TEST_NAME, WALL_CLOCK_US};
use crate::error::{ReportError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Cells read as "no reading" in extra columns
const MISSING_MARKERS: &[&str] = &["", "nan", "na", "n/a", "null", "none", "-"];

/// Read an extra-column cell: `Some(None)` for a missing marker, `Some(Some(v))`
/// for a finite number, `None` if the cell is not a number at all
fn metric_cell(cell: &str) -> Option<Option<f64>> {
    if MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m)) {
        return Some(None);
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite()).map(Some)
}

/// Load a result file from disk
pub fn load(path: &Path) -> Result<Dataset> {
    let file = File::open(path).map_err(|e| ReportError::data_load(path, e.to_string()))?;
    let dataset = load_from_reader(file, path)?;

    tracing::debug!(
        path = %path.display(),
        rows = dataset.len(),
        metrics = dataset.metric_columns().len(),
        "loaded result file"
    );

    Ok(dataset)
}

/// Load result rows from any reader; `path` is only used in error messages
pub fn load_from_reader<R: Read>(reader: R, path: &Path) -> Result<Dataset> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| ReportError::data_load(path, e.to_string()))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| ReportError::data_load(path, format!("missing required column '{}'", name)))
    };
    let name_idx = column(TEST_NAME)?;
    let bytes_idx = column(NUMBER_OF_BYTES)?;
    let wall_idx = column(WALL_CLOCK_US)?;

    let rows: Vec<StringRecord> = rdr
        .records()
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| ReportError::data_load(path, e.to_string()))?;

    // Extra columns are kept only when every cell is a number or a missing marker
    let metric_idx: Vec<usize> = (0..headers.len())
        .filter(|&idx| idx != name_idx && idx != bytes_idx && idx != wall_idx)
        .filter(|&idx| {
            let numeric = rows
                .iter()
                .all(|row| metric_cell(row.get(idx).unwrap_or("")).is_some());
            if !numeric {
                tracing::debug!(column = &headers[idx], "dropping non-numeric column");
            }
            numeric
        })
        .collect();

    let metric_columns: Vec<String> = metric_idx.iter().map(|&idx| headers[idx].to_string()).collect();

    let mut records = Vec::with_capacity(rows.len());
    for (line, row) in rows.iter().enumerate() {
        // header is line 1
        let line = line + 2;
        let cell = |idx: usize| row.get(idx).unwrap_or("");

        let number_of_bytes = cell(bytes_idx).parse::<u64>().map_err(|_| {
            ReportError::data_load(
                path,
                format!("line {}: invalid '{}' value '{}'", line, NUMBER_OF_BYTES, cell(bytes_idx)),
            )
        })?;

        let wall_clock_us = cell(wall_idx)
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                ReportError::data_load(
                    path,
                    format!("line {}: invalid '{}' value '{}'", line, WALL_CLOCK_US, cell(wall_idx)),
                )
            })?;

        let metrics = metric_idx
            .iter()
            .map(|&idx| metric_cell(cell(idx)).flatten())
            .collect();

        records.push(Record {
            test_name: cell(name_idx).to_string(),
            number_of_bytes,
            wall_clock_us,
            metrics,
        });
    }

    Dataset::new(metric_columns, records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(text: &str) -> Result<Dataset> {
        load_from_reader(text.as_bytes(), Path::new("test.result"))
    }

    #[test]
    fn test_load_required_columns() {
        let data = parse("test name,number of bytes,wall clock us\nA,100,10\nB,200,5.5\n").unwrap();

        assert_eq!(data.len(), 2);
        assert!(data.metric_columns().is_empty());
        assert_eq!(data.records()[0], Record::new("A", 100, 10.0));
        assert_eq!(data.records()[1], Record::new("B", 200, 5.5));
    }

    #[test]
    fn test_load_trims_whitespace() {
        let data = parse("test name, number of bytes, wall clock us\nA , 100, 10\n").unwrap();
        assert_eq!(data.records()[0], Record::new("A", 100, 10.0));
    }

    #[test]
    fn test_load_keeps_numeric_extra_columns() {
        let data = parse(
            "test name,number of bytes,wall clock us,cpu us,host,rounds\n\
             A,100,10,4.5,alpha,3\n\
             A,100,20,,beta,5\n",
        )
        .unwrap();

        assert_eq!(data.metric_columns(), &["cpu us".to_string(), "rounds".to_string()]);
        assert_eq!(data.records()[0].metrics, vec![Some(4.5), Some(3.0)]);
        assert_eq!(data.records()[1].metrics, vec![None, Some(5.0)]);
    }

    #[test]
    fn test_load_missing_markers_are_not_numbers() {
        let data = parse(
            "test name,number of bytes,wall clock us,cpu us,retries\n\
             A,100,10,NaN,N/A\n\
             A,100,20,4,2\n\
             A,100,30,nan,null\n",
        )
        .unwrap();

        assert_eq!(data.metric_columns(), &["cpu us".to_string(), "retries".to_string()]);
        assert_eq!(data.records()[0].metrics, vec![None, None]);
        assert_eq!(data.records()[1].metrics, vec![Some(4.0), Some(2.0)]);
        assert_eq!(data.records()[2].metrics, vec![None, None]);
    }

    #[test]
    fn test_load_drops_non_finite_columns() {
        let data = parse(
            "test name,number of bytes,wall clock us,cpu us,peak\n\
             A,100,10,1,inf\n\
             A,100,20,2,5\n",
        )
        .unwrap();
        assert_eq!(data.metric_columns(), &["cpu us".to_string()]);
    }

    #[test]
    fn test_metric_cell() {
        assert_eq!(metric_cell(""), Some(None));
        assert_eq!(metric_cell("NA"), Some(None));
        assert_eq!(metric_cell("2.5"), Some(Some(2.5)));
        assert_eq!(metric_cell("-inf"), None);
        assert_eq!(metric_cell("alpha"), None);
    }

    #[test]
    fn test_load_columns_in_any_order() {
        let data = parse("wall clock us,test name,number of bytes\n7,Z,64\n").unwrap();
        assert_eq!(data.records()[0], Record::new("Z", 64, 7.0));
    }

    #[test]
    fn test_load_header_only() {
        let data = parse("test name,number of bytes,wall clock us\n").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_load_missing_column() {
        let err = parse("test name,wall clock us\nA,10\n").unwrap_err();
        match err {
            ReportError::DataLoad { reason, .. } => assert!(reason.contains("number of bytes")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_wrong_column_count() {
        let err = parse("test name,number of bytes,wall clock us\nA,100\n").unwrap_err();
        assert!(matches!(err, ReportError::DataLoad { .. }));
    }

    #[test]
    fn test_load_bad_byte_count() {
        let err = parse("test name,number of bytes,wall clock us\nA,lots,10\n").unwrap_err();
        match err {
            ReportError::DataLoad { reason, .. } => assert!(reason.contains("line 2")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_bad_wall_clock() {
        for value in ["", "slow", "inf"] {
            let text = format!("test name,number of bytes,wall clock us\nA,100,{}\n", value);
            assert!(matches!(parse(&text), Err(ReportError::DataLoad { .. })));
        }
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "test name,number of bytes,wall clock us").unwrap();
        writeln!(file, "A,100,10").unwrap();
        writeln!(file, "A,100,20").unwrap();

        let data = load(file.path()).unwrap();
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load(Path::new("/definitely/not/here.result")).unwrap_err();
        match err {
            ReportError::DataLoad { path, .. } => {
                assert_eq!(path, Path::new("/definitely/not/here.result"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
