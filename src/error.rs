//! Error handling for ADIF conversion and CSV profiling.
//!
//! Usage errors (missing files, bad extensions, identical paths) and CSV
//! load failures are fatal for a run. Malformed ADIF content never produces
//! an error; it only yields fewer records.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdifError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("The provided file path {} does not exist", path.display())]
    FileNotFound { path: PathBuf },

    #[error(
        "The input file and output file paths cannot be the same: {}",
        path.display()
    )]
    SamePath { path: PathBuf },

    #[error("The {role} file must have a {expected} extension: {}", path.display())]
    InvalidExtension {
        role: &'static str,
        expected: &'static str,
        path: PathBuf,
    },

    #[error("Error loading CSV file {}: {reason}", path.display())]
    CsvLoad { path: PathBuf, reason: String },

    #[error("Report template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl AdifError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for the upfront argument checks
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::SamePath { .. } | Self::InvalidExtension { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, AdifError>;
