//! Descriptive profiling of CSV tables.
//!
//! A CSV file is loaded once through polars with every column read as a
//! string, copied into a column-major [`Table`], and summarized into a
//! [`DatasetProfile`]: dataset overview, per-column statistics, alerts,
//! numeric correlations and a row sample. [`report`] renders the profile as
//! a self-contained HTML document.

pub mod column;
pub mod correlation;
pub mod report;

use self::column::{
    ColumnKind, ColumnOptions, ColumnProfile, parse_number, percent, present_value, profile_column,
};
use self::correlation::{CorrelationMatrix, correlation_matrix};

use crate::config::ProfileConfig;
use crate::error::{AdifError, Result};

use chrono::Local;
use polars::prelude::{CsvReadOptions, DataFrame, DataType, SerReader};
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use self::report::{render_html, write_report};

/// One named column of raw cells
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub name: String,
    pub values: Vec<Option<String>>,
}

/// Column-major string table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<TableColumn>,
}

impl Table {
    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn row(&self, index: usize) -> Vec<Option<&str>> {
        self.columns
            .iter()
            .map(|c| c.values.get(index).and_then(|v| v.as_deref()))
            .collect()
    }

    /// Copy a polars frame into owned string cells
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut columns = Vec::with_capacity(df.width());

        for column in df.get_columns() {
            let series = column.as_materialized_series().cast(&DataType::String)?;
            let values = series
                .str()?
                .into_iter()
                .map(|value| value.map(str::to_string))
                .collect();

            columns.push(TableColumn {
                name: column.name().to_string(),
                values,
            });
        }

        Ok(Self { columns })
    }
}

/// Load a CSV file with a header row, reading every column as text
pub fn load_csv(path: &Path) -> Result<Table> {
    let to_load_error = |e: polars::error::PolarsError| AdifError::CsvLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(to_load_error)?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );

    Table::from_dataframe(&df)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Empty,
    HighMissing,
    Constant,
    Unique,
    HighCardinality,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub column: String,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub missing_cells: usize,
    pub missing_percent: f64,
    pub duplicate_rows: usize,
    pub duplicate_percent: f64,
    pub numeric_columns: usize,
    pub categorical_columns: usize,
    pub text_columns: usize,
    pub empty_columns: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RowSample {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Everything the report shows about one table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetProfile {
    pub title: String,
    pub source: PathBuf,
    pub generated_at: String,
    pub overview: DatasetOverview,
    pub columns: Vec<ColumnProfile>,
    pub alerts: Vec<Alert>,
    pub correlations: CorrelationMatrix,
    pub sample: RowSample,
}

/// Summarize a loaded table
pub fn profile_table(table: &Table, config: &ProfileConfig) -> DatasetProfile {
    let options = ColumnOptions {
        top_values: config.top_values,
        histogram_bins: config.histogram_bins,
        categorical_threshold: config.categorical_threshold,
    };

    let columns: Vec<ColumnProfile> = table
        .columns
        .iter()
        .map(|c| profile_column(&c.name, &c.values, &options))
        .collect();

    let alerts = columns
        .iter()
        .flat_map(|c| column_alerts(c, config.high_missing_ratio))
        .collect::<Vec<_>>();

    let numeric_columns: Vec<(String, Vec<Option<f64>>)> = table
        .columns
        .iter()
        .zip(&columns)
        .filter(|(_, profile)| profile.kind == ColumnKind::Numeric)
        .map(|(column, _)| {
            let values = column
                .values
                .iter()
                .map(|v| present_value(v).and_then(parse_number))
                .collect();
            (column.name.clone(), values)
        })
        .collect();

    let overview = overview(table, &columns);
    info!(
        "Profiled {} rows x {} columns ({} alerts)",
        overview.rows,
        overview.columns,
        alerts.len()
    );

    DatasetProfile {
        title: config.title.clone(),
        source: config.csv_path.clone(),
        generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        overview,
        columns,
        alerts,
        correlations: correlation_matrix(&numeric_columns),
        sample: sample(table, config.sample_rows),
    }
}

fn overview(table: &Table, columns: &[ColumnProfile]) -> DatasetOverview {
    let rows = table.height();
    let missing_cells: usize = columns.iter().map(|c| c.missing).sum();
    let duplicate_rows = duplicate_rows(table);
    let count_kind = |kind: ColumnKind| columns.iter().filter(|c| c.kind == kind).count();

    DatasetOverview {
        rows,
        columns: table.width(),
        missing_cells,
        missing_percent: percent(missing_cells, rows * table.width()),
        duplicate_rows,
        duplicate_percent: percent(duplicate_rows, rows),
        numeric_columns: count_kind(ColumnKind::Numeric),
        categorical_columns: count_kind(ColumnKind::Categorical),
        text_columns: count_kind(ColumnKind::Text),
        empty_columns: count_kind(ColumnKind::Empty),
    }
}

/// Rows identical to an earlier row
fn duplicate_rows(table: &Table) -> usize {
    let mut seen = HashSet::new();
    (0..table.height())
        .filter(|&i| !seen.insert(table.row(i)))
        .count()
}

fn sample(table: &Table, limit: usize) -> RowSample {
    RowSample {
        headers: table.columns.iter().map(|c| c.name.clone()).collect(),
        rows: (0..table.height().min(limit))
            .map(|i| {
                table
                    .row(i)
                    .into_iter()
                    .map(|cell| cell.unwrap_or_default().to_string())
                    .collect()
            })
            .collect(),
    }
}

fn column_alerts(column: &ColumnProfile, high_missing_ratio: f64) -> Vec<Alert> {
    let alert = |kind, message: String| Alert {
        column: column.name.clone(),
        kind,
        message,
    };

    if column.kind == ColumnKind::Empty {
        return vec![alert(
            AlertKind::Empty,
            format!("{} has no values", column.name),
        )];
    }

    let mut alerts = Vec::new();

    if column.missing_ratio() > high_missing_ratio {
        alerts.push(alert(
            AlertKind::HighMissing,
            format!(
                "{} has {} ({:.1}%) missing values",
                column.name, column.missing, column.missing_percent
            ),
        ));
    }

    if column.distinct == 1 {
        alerts.push(alert(
            AlertKind::Constant,
            format!("{} has a constant value", column.name),
        ));
    } else if column.present > 1 && column.distinct == column.present {
        alerts.push(alert(
            AlertKind::Unique,
            format!("{} has unique values", column.name),
        ));
    } else if column.kind == ColumnKind::Text
        && column.distinct_ratio() > crate::constants::HIGH_CARDINALITY_RATIO
    {
        alerts.push(alert(
            AlertKind::HighCardinality,
            format!(
                "{} has a high cardinality: {} distinct values",
                column.name, column.distinct
            ),
        ));
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: Vec<(&str, Vec<&str>)>) -> Table {
        Table {
            columns: columns
                .into_iter()
                .map(|(name, values)| TableColumn {
                    name: name.to_string(),
                    values: values
                        .into_iter()
                        .map(|v| (!v.is_empty()).then(|| v.to_string()))
                        .collect(),
                })
                .collect(),
        }
    }

    fn contacts() -> Table {
        table(vec![
            ("CALL", vec!["DJ0DE", "W1AW", "K1ABC", "W1AW"]),
            ("BAND", vec!["40M", "20M", "", "20M"]),
            ("FREQ", vec!["7.074", "14.074", "", "14.074"]),
            ("TX_PWR", vec!["10", "100", "50", "100"]),
            ("NOTES", vec!["", "", "", ""]),
        ])
    }

    #[test]
    fn test_table_shape() {
        let table = contacts();
        assert_eq!(table.height(), 4);
        assert_eq!(table.width(), 5);
        assert_eq!(table.row(2), vec![Some("K1ABC"), None, None, Some("50"), None]);
        assert_eq!(Table::default().height(), 0);
    }

    #[test]
    fn test_overview() {
        let profile = profile_table(&contacts(), &ProfileConfig::default());
        let overview = &profile.overview;

        assert_eq!(overview.rows, 4);
        assert_eq!(overview.columns, 5);
        assert_eq!(overview.missing_cells, 6);
        assert_eq!(overview.missing_percent, 30.0);
        assert_eq!(overview.duplicate_rows, 1);
        assert_eq!(overview.numeric_columns, 2);
        assert_eq!(overview.categorical_columns, 2);
        assert_eq!(overview.empty_columns, 1);
    }

    #[test]
    fn test_alerts() {
        let mut config = ProfileConfig::default();
        config.high_missing_ratio = 0.2;
        let profile = profile_table(&contacts(), &config);

        let kinds_for = |name: &str| {
            profile
                .alerts
                .iter()
                .filter(|a| a.column == name)
                .map(|a| a.kind)
                .collect::<Vec<_>>()
        };

        assert_eq!(kinds_for("NOTES"), vec![AlertKind::Empty]);
        assert_eq!(kinds_for("BAND"), vec![AlertKind::HighMissing]);
        assert!(kinds_for("CALL").is_empty());
    }

    #[test]
    fn test_unique_and_constant_alerts() {
        let table = table(vec![
            ("CALL", vec!["A", "B", "C"]),
            ("MODE", vec!["FT8", "FT8", "FT8"]),
        ]);
        let profile = profile_table(&table, &ProfileConfig::default());

        assert_eq!(profile.alerts.len(), 2);
        assert_eq!(profile.alerts[0].kind, AlertKind::Unique);
        assert_eq!(profile.alerts[1].kind, AlertKind::Constant);
    }

    #[test]
    fn test_correlations_cover_numeric_columns() {
        let profile = profile_table(&contacts(), &ProfileConfig::default());

        assert_eq!(profile.correlations.columns, vec!["FREQ", "TX_PWR"]);
        let r = profile.correlations.get("FREQ", "TX_PWR").unwrap();
        assert!((r - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sample_limit() {
        let mut config = ProfileConfig::default();
        config.sample_rows = 2;
        let profile = profile_table(&contacts(), &config);

        assert_eq!(profile.sample.headers.len(), 5);
        assert_eq!(profile.sample.rows.len(), 2);
        assert_eq!(profile.sample.rows[0], vec!["DJ0DE", "40M", "7.074", "10", ""]);
    }

    #[test]
    fn test_empty_table() {
        let profile = profile_table(&Table::default(), &ProfileConfig::default());

        assert_eq!(profile.overview.rows, 0);
        assert_eq!(profile.overview.missing_percent, 0.0);
        assert!(profile.correlations.is_empty());
        assert!(profile.sample.rows.is_empty());
    }
}
