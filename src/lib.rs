//! ADIF to CSV converter library
//!
//! Converts amateur-radio contact logs in ADIF (Amateur Data Interchange
//! Format) into CSV tables, and profiles CSV tables into a descriptive
//! HTML report.
//!
//! This library provides tools for:
//! - Splitting ADIF text into flat records, tolerant of malformed input
//! - Writing records as a CSV table whose columns are the union of all fields
//! - Loading a CSV table and computing per-column statistics, alerts and
//!   correlations
//! - Rendering the statistics as a self-contained HTML document

pub mod adif;
pub mod config;
pub mod constants;
pub mod converter;
pub mod error;
pub mod models;
pub mod profile;
pub mod writer;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use adif::{AdifParser, parse_adif};
pub use config::{ConvertConfig, ProfileConfig};
pub use converter::AdifConverter;
pub use error::{AdifError, Result};
pub use models::{ConversionStats, Record};
