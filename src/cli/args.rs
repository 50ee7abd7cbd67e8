//! Command-line argument definitions for the converter and the profiler
//!
//! Both programs take optional positional paths; anything left out falls
//! back to the named defaults in [`crate::constants`].

use crate::config::{ConvertConfig, ProfileConfig};
use clap::Parser;
use std::path::PathBuf;

/// Convert an ADIF contact log to a CSV table
///
/// Every distinct field name in the log becomes a column; contacts that do
/// not carry a field get an empty cell.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "adif_csv",
    version,
    about = "Convert ADIF (.adi/.adif) contact logs to CSV",
    long_about = "Converts amateur-radio contact logs in ADIF format to CSV for easier \
                  analysis. Field names are upper-cased and stripped of their length/type \
                  annotation; values are copied verbatim. Without arguments, reads file.adi \
                  and writes a timestamped converted_csv_file_<time>.csv."
)]
pub struct ConvertArgs {
    /// Path to the input ADIF file (defaults to file.adi)
    #[arg(value_name = "ADIF_FILE")]
    pub adif_file: Option<PathBuf>,

    /// Path to the output CSV file (defaults to a timestamped name)
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl ConvertArgs {
    /// Resolve the conversion settings, filling in defaults
    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig::new(self.adif_file.clone(), self.csv_file.clone())
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

/// Generate a descriptive statistics report from a CSV table
#[derive(Debug, Clone, Parser)]
#[command(
    name = "adif_profile",
    version,
    about = "Generate an HTML profiling report from a CSV file",
    long_about = "Loads a CSV table (for example one written by adif_csv) and writes a \
                  self-contained HTML report with an overview, per-column statistics, \
                  alerts, correlations and a sample of rows. Without arguments, reads \
                  converted_csv_file.csv."
)]
pub struct ProfileArgs {
    /// Path to the input CSV file (defaults to converted_csv_file.csv)
    #[arg(value_name = "CSV_FILE")]
    pub csv_file: Option<PathBuf>,

    /// Path of the HTML report (defaults to a timestamped name)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report title
    #[arg(long = "title", value_name = "TITLE")]
    pub title: Option<String>,

    /// Number of most frequent values listed per column
    #[arg(long = "top", value_name = "COUNT")]
    pub top_values: Option<usize>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl ProfileArgs {
    /// Resolve the profiling settings, filling in defaults
    pub fn to_config(&self) -> ProfileConfig {
        let mut config = ProfileConfig::new(self.csv_file.clone());
        if let Some(output) = &self.output {
            config = config.with_report_path(output.clone());
        }
        if let Some(title) = &self.title {
            config = config.with_title(title.clone());
        }
        if let Some(top_values) = self.top_values {
            config.top_values = top_values;
        }
        config
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
