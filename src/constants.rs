//! Application constants for the ADIF converter and CSV profiler
//!
//! Default paths, file-name patterns, tokenizer patterns and report
//! tuning values used throughout the crate.

// =============================================================================
// Default Paths
// =============================================================================

/// Input used by the converter when no ADIF path is given
pub const DEFAULT_ADIF_PATH: &str = "file.adi";

/// Prefix of the timestamped CSV the converter writes by default
pub const DEFAULT_CSV_PREFIX: &str = "converted_csv_file_";

/// CSV read by the profiler when no path is given
pub const DEFAULT_PROFILE_CSV_PATH: &str = "converted_csv_file.csv";

/// Prefix of the timestamped HTML report
pub const DEFAULT_REPORT_PREFIX: &str = "data_profile_report_";

/// chrono format for the converter's default output name
pub const CSV_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// chrono format for the profiler's default report name
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// =============================================================================
// File Extensions
// =============================================================================

/// Accepted ADIF input extensions (case-insensitive)
pub const ADIF_EXTENSIONS: &[&str] = &[".adi", ".adif"];

/// Required CSV extension (case-insensitive)
pub const CSV_EXTENSION: &str = ".csv";

// =============================================================================
// ADIF Tokenizer
// =============================================================================

/// End-of-record marker, matched case-insensitively
pub const EOR_PATTERN: &str = r"(?i)<eor>";

/// A tag in angle brackets followed by its value up to the next `<`
pub const FIELD_PATTERN: &str = r"<(.*?)>([^<]*)";

/// Separator between a field name and its length/type annotation
pub const FIELD_SPEC_SEPARATOR: char = ':';

// =============================================================================
// Console Messages
// =============================================================================

pub const NORMALIZATION_NOTE: &str = "Note: This simple conversion may not handle all ADIF fields \
perfectly, for example if the band field has differing formatting (40M vs 40m). Please verify \
the output CSV file or the profile report for accuracy, and change the .adi file if necessary \
before running the conversion again.";

// =============================================================================
// Profile Report Defaults
// =============================================================================

pub const DEFAULT_REPORT_TITLE: &str = "ADIF to CSV Data Profile";

/// Most frequent values listed per column
pub const DEFAULT_TOP_VALUES: usize = 10;

/// Equal-width bins in numeric histograms
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Rows shown in the sample section
pub const DEFAULT_SAMPLE_ROWS: usize = 10;

/// Highest distinct count still treated as categorical
pub const DEFAULT_CATEGORICAL_THRESHOLD: usize = 50;

/// Missing share above which a column gets an alert
pub const DEFAULT_HIGH_MISSING_RATIO: f64 = 0.5;

/// Distinct share above which a non-numeric column gets a cardinality alert
pub const HIGH_CARDINALITY_RATIO: f64 = 0.5;

/// Name the embedded report template is registered under
pub const REPORT_TEMPLATE_NAME: &str = "report.html";
