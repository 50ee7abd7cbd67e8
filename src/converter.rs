//! ADIF to CSV conversion pipeline.
//!
//! Reads one ADIF file, splits it into records and writes the CSV table.
//! The whole run is a single synchronous pass; the CSV write is the last
//! step, so nothing needs cleaning up when an earlier step fails.

use crate::adif::{AdifParser, read_adif_file};
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::models::ConversionStats;
use crate::writer::{column_union, write_csv};

use std::time::Instant;
use tracing::{debug, info};

/// Converter for a single ADIF file
#[derive(Debug)]
pub struct AdifConverter {
    config: ConvertConfig,
    parser: AdifParser,
}

impl AdifConverter {
    /// Create a converter after validating its paths
    pub fn new(config: ConvertConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            parser: AdifParser::new(),
        })
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Run the conversion
    pub fn convert(&self) -> Result<ConversionStats> {
        let start_time = Instant::now();

        let content = read_adif_file(&self.config.input_path)?;
        debug!(
            "Read {} bytes from {}",
            content.len(),
            self.config.input_path.display()
        );

        let (records, parse_stats) = self.parser.parse_with_stats(&content);
        let columns = column_union(&records);

        let rows = write_csv(&records, &self.config.output_path)?;

        let stats = ConversionStats {
            records_written: rows,
            columns_written: columns.len(),
            fields_parsed: parse_stats.fields_parsed,
            chunks_skipped: parse_stats.chunks_skipped(),
            output_path: self.config.output_path.clone(),
            processing_time_ms: start_time.elapsed().as_millis(),
        };

        info!(
            "Converted {} records with {} columns in {}ms",
            stats.records_written, stats.columns_written, stats.processing_time_ms
        );

        Ok(stats)
    }
}
