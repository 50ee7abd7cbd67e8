//! CSV output for parsed ADIF records.
//!
//! Records are assembled into a polars `DataFrame` whose columns are the
//! union of all field names in first-seen order, then serialized with the
//! polars CSV writer. Fields a record does not carry become null cells,
//! which the writer renders as empty.

use crate::error::{AdifError, Result};
use crate::models::Record;

use polars::prelude::{Column, CsvWriter, DataFrame, SerWriter};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Union of field names across records, in first-seen order
pub fn column_union(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();

    for name in records.iter().flat_map(Record::names) {
        if seen.insert(name) {
            columns.push(name.to_string());
        }
    }

    columns
}

/// Build a string table with one row per record
pub fn records_to_dataframe(records: &[Record]) -> Result<DataFrame> {
    let columns: Vec<Column> = column_union(records)
        .iter()
        .map(|name| {
            let values: Vec<Option<&str>> =
                records.iter().map(|record| record.get(name)).collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    DataFrame::new(columns).map_err(AdifError::from)
}

/// Write records as CSV and return the number of data rows
///
/// An empty record sequence produces an empty file.
pub fn write_csv(records: &[Record], path: &Path) -> Result<usize> {
    let mut file = File::create(path)?;

    if records.is_empty() {
        debug!("No records to write, leaving {} empty", path.display());
        return Ok(0);
    }

    let mut df = records_to_dataframe(records)?;
    debug!(
        "Writing {} rows x {} columns to {}",
        df.height(),
        df.width(),
        path.display()
    );

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;

    Ok(df.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adif::parse_adif;
    use tempfile::TempDir;

    fn example_records() -> Vec<Record> {
        parse_adif("<CALL>DJ0DE<BAND>40M<eor><CALL>W1AW<MODE:3>SSB<eor>")
    }

    #[test]
    fn test_column_union_first_seen_order() {
        let records = example_records();
        assert_eq!(column_union(&records), vec!["CALL", "BAND", "MODE"]);
    }

    #[test]
    fn test_column_union_empty() {
        assert!(column_union(&[]).is_empty());
    }

    #[test]
    fn test_records_to_dataframe_shape() {
        let df = records_to_dataframe(&example_records()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 3);
        let mode = df.column("MODE").unwrap();
        assert_eq!(mode.null_count(), 1);
    }

    #[test]
    fn test_write_csv_example_output() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.csv");

        let rows = write_csv(&example_records(), &path).unwrap();
        assert_eq!(rows, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["CALL,BAND,MODE", "DJ0DE,40M,", "W1AW,,SSB"]);
    }

    #[test]
    fn test_write_csv_quotes_separators() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quoted.csv");
        let records = parse_adif("<CALL>W1AW<COMMENT>tnx, 73<eor>");

        write_csv(&records, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"tnx, 73\""));
    }

    #[test]
    fn test_write_csv_no_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.csv");

        let rows = write_csv(&[], &path).unwrap();

        assert_eq!(rows, 0);
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
