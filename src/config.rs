//! Configuration for the converter and the profiler.
//!
//! Fallback paths are named defaults resolved once at program start. Each
//! binary builds its config from the command line and hands it to the
//! command, which validates it before touching any file.

use crate::constants::{
    ADIF_EXTENSIONS, CSV_EXTENSION, CSV_TIMESTAMP_FORMAT, DEFAULT_ADIF_PATH,
    DEFAULT_CATEGORICAL_THRESHOLD, DEFAULT_CSV_PREFIX, DEFAULT_HIGH_MISSING_RATIO,
    DEFAULT_HISTOGRAM_BINS, DEFAULT_PROFILE_CSV_PATH, DEFAULT_REPORT_PREFIX,
    DEFAULT_REPORT_TITLE, DEFAULT_SAMPLE_ROWS, DEFAULT_TOP_VALUES, REPORT_TIMESTAMP_FORMAT,
};
use crate::error::{AdifError, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build `<prefix><local timestamp>.<extension>`
pub fn timestamped_path(prefix: &str, format: &str, extension: &str) -> PathBuf {
    let stamp = Local::now().format(format);
    PathBuf::from(format!("{}{}.{}", prefix, stamp, extension))
}

/// Case-insensitive suffix check on the full path text
fn has_extension(path: &Path, extension: &str) -> bool {
    path.to_string_lossy()
        .to_lowercase()
        .ends_with(&extension.to_lowercase())
}

/// Absolute form for path comparison, falling back to the path itself
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Settings for one ADIF to CSV conversion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvertConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_ADIF_PATH),
            output_path: timestamped_path(DEFAULT_CSV_PREFIX, CSV_TIMESTAMP_FORMAT, "csv"),
        }
    }
}

impl ConvertConfig {
    /// Use the given paths, falling back to the defaults for missing ones
    pub fn new(input_path: Option<PathBuf>, output_path: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            input_path: input_path.unwrap_or(defaults.input_path),
            output_path: output_path.unwrap_or(defaults.output_path),
        }
    }

    /// Whether the output file is already present
    pub fn output_exists(&self) -> bool {
        self.output_path.is_file()
    }

    /// Upfront checks, run before anything is read or written
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.is_file() {
            return Err(AdifError::FileNotFound {
                path: self.input_path.clone(),
            });
        }

        if absolute(&self.input_path) == absolute(&self.output_path) {
            return Err(AdifError::SamePath {
                path: self.input_path.clone(),
            });
        }

        if !has_extension(&self.output_path, CSV_EXTENSION) {
            return Err(AdifError::InvalidExtension {
                role: "output",
                expected: ".csv",
                path: self.output_path.clone(),
            });
        }

        if !ADIF_EXTENSIONS
            .iter()
            .any(|ext| has_extension(&self.input_path, ext))
        {
            return Err(AdifError::InvalidExtension {
                role: "input",
                expected: ".adi or .adif",
                path: self.input_path.clone(),
            });
        }

        debug!(
            "Conversion config validated: {} -> {}",
            self.input_path.display(),
            self.output_path.display()
        );
        Ok(())
    }
}

/// Settings for profiling a CSV table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub csv_path: PathBuf,
    pub report_path: PathBuf,
    pub title: String,

    /// Most frequent values listed per column
    pub top_values: usize,

    /// Equal-width bins per numeric histogram
    pub histogram_bins: usize,

    /// Leading rows shown in the sample section
    pub sample_rows: usize,

    /// Highest distinct count still treated as categorical
    pub categorical_threshold: usize,

    /// Missing share above which a column is flagged
    pub high_missing_ratio: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_PROFILE_CSV_PATH),
            report_path: timestamped_path(DEFAULT_REPORT_PREFIX, REPORT_TIMESTAMP_FORMAT, "html"),
            title: DEFAULT_REPORT_TITLE.to_string(),
            top_values: DEFAULT_TOP_VALUES,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            sample_rows: DEFAULT_SAMPLE_ROWS,
            categorical_threshold: DEFAULT_CATEGORICAL_THRESHOLD,
            high_missing_ratio: DEFAULT_HIGH_MISSING_RATIO,
        }
    }
}

impl ProfileConfig {
    /// Use the given CSV path, falling back to the default
    pub fn new(csv_path: Option<PathBuf>) -> Self {
        let defaults = Self::default();
        Self {
            csv_path: csv_path.unwrap_or(defaults.csv_path),
            ..defaults
        }
    }

    pub fn with_report_path(mut self, report_path: PathBuf) -> Self {
        self.report_path = report_path;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Upfront checks on the CSV path and report settings
    pub fn validate(&self) -> Result<()> {
        if !self.csv_path.is_file() {
            return Err(AdifError::FileNotFound {
                path: self.csv_path.clone(),
            });
        }

        if !has_extension(&self.csv_path, CSV_EXTENSION) {
            return Err(AdifError::InvalidExtension {
                role: "input",
                expected: ".csv",
                path: self.csv_path.clone(),
            });
        }

        if self.histogram_bins == 0 {
            return Err(AdifError::configuration(
                "Histogram bin count must be greater than 0",
            ));
        }

        if !(0.0..=1.0).contains(&self.high_missing_ratio) {
            return Err(AdifError::configuration(format!(
                "Missing ratio threshold must be between 0 and 1, got {}",
                self.high_missing_ratio
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, "<CALL>W1AW<eor>").unwrap();
        path
    }

    #[test]
    fn test_convert_defaults() {
        let config = ConvertConfig::new(None, None);
        assert_eq!(config.input_path, PathBuf::from("file.adi"));

        let output = config.output_path.to_string_lossy().to_string();
        assert!(output.starts_with("converted_csv_file_"));
        assert!(output.ends_with(".csv"));
        // converted_csv_file_YYYYMMDD-HHMMSS.csv
        assert_eq!(output.len(), "converted_csv_file_".len() + 15 + 4);
    }

    #[test]
    fn test_convert_explicit_paths() {
        let config = ConvertConfig::new(Some("a.adif".into()), Some("b.csv".into()));
        assert_eq!(config.input_path, PathBuf::from("a.adif"));
        assert_eq!(config.output_path, PathBuf::from("b.csv"));
    }

    #[test]
    fn test_validate_accepts_valid_paths() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "log.ADI");
        let config = ConvertConfig::new(Some(input), Some(dir.path().join("out.CSV")));

        assert!(config.validate().is_ok());
        assert!(!config.output_exists());
    }

    #[test]
    fn test_validate_missing_input() {
        let dir = TempDir::new().unwrap();
        let config = ConvertConfig::new(
            Some(dir.path().join("missing.adi")),
            Some(dir.path().join("out.csv")),
        );

        let err = config.validate().unwrap_err();
        assert!(matches!(err, AdifError::FileNotFound { .. }));
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_validate_same_path() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "log.adi");
        let config = ConvertConfig::new(Some(input.clone()), Some(input));

        assert!(matches!(
            config.validate(),
            Err(AdifError::SamePath { .. })
        ));
    }

    #[test]
    fn test_validate_output_extension() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "log.adi");
        let config = ConvertConfig::new(Some(input), Some(dir.path().join("out.txt")));

        assert!(matches!(
            config.validate(),
            Err(AdifError::InvalidExtension { role: "output", .. })
        ));
    }

    #[test]
    fn test_validate_input_extension() {
        let dir = TempDir::new().unwrap();
        let input = write_file(&dir, "log.txt");
        let config = ConvertConfig::new(Some(input), Some(dir.path().join("out.csv")));

        assert!(matches!(
            config.validate(),
            Err(AdifError::InvalidExtension { role: "input", .. })
        ));
    }

    #[test]
    fn test_profile_defaults() {
        let config = ProfileConfig::new(None);
        assert_eq!(config.csv_path, PathBuf::from("converted_csv_file.csv"));
        assert_eq!(config.title, "ADIF to CSV Data Profile");
        assert_eq!(config.top_values, 10);

        let report = config.report_path.to_string_lossy().to_string();
        assert!(report.starts_with("data_profile_report_"));
        assert!(report.ends_with(".html"));
    }

    #[test]
    fn test_profile_validate() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join("log.csv");
        std::fs::write(&csv, "CALL\nW1AW\n").unwrap();
        let not_csv = write_file(&dir, "log.tsv");

        assert!(ProfileConfig::new(Some(csv.clone())).validate().is_ok());
        assert!(matches!(
            ProfileConfig::new(Some(dir.path().join("gone.csv"))).validate(),
            Err(AdifError::FileNotFound { .. })
        ));
        assert!(matches!(
            ProfileConfig::new(Some(not_csv)).validate(),
            Err(AdifError::InvalidExtension { .. })
        ));

        let mut zero_bins = ProfileConfig::new(Some(csv));
        zero_bins.histogram_bins = 0;
        assert!(matches!(
            zero_bins.validate(),
            Err(AdifError::Configuration { .. })
        ));
    }
}
