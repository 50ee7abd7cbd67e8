//! Command implementations for the converter and profiler binaries
//!
//! Each command prints user-facing progress to stdout, validates its
//! configuration before touching any file, and returns an error for the
//! binary to report with exit status 1.

use crate::cli::args::{ConvertArgs, ProfileArgs};
use crate::constants::NORMALIZATION_NOTE;
use crate::converter::AdifConverter;
use crate::models::ConversionStats;
use crate::profile::{load_csv, profile_table, write_report};

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;
use tracing::debug;

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the level chosen on the command line.
pub fn setup_logging(log_level: &str, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("adif_csv={}", log_level)));

    if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", log_level);
}

/// Convert one ADIF file to CSV
pub fn run_convert(args: &ConvertArgs) -> Result<ConversionStats> {
    let config = args.to_config();

    println!(
        "{} {}",
        "Input ADIF file:".bright_cyan(),
        config.input_path.display()
    );
    println!(
        "{} {}",
        "Output CSV file:".bright_cyan(),
        config.output_path.display()
    );

    if !config.output_exists() {
        println!(
            "{} The file {} does not exist and will be created.",
            "Warning:".bright_yellow(),
            config.output_path.display()
        );
    }

    let converter = AdifConverter::new(config)?;
    let stats = converter.convert().with_context(|| {
        format!(
            "Failed to convert {}",
            converter.config().input_path.display()
        )
    })?;

    println!(
        "{} {} to {}",
        "Converted".bright_green(),
        converter.config().input_path.display(),
        stats.output_path.display()
    );
    println!(
        "  {} {}  {} {}",
        "Records:".bright_cyan(),
        stats.records_written.to_string().bright_white().bold(),
        "Columns:".bright_cyan(),
        stats.columns_written.to_string().bright_white().bold()
    );
    println!("{}", NORMALIZATION_NOTE.bright_black());

    Ok(stats)
}

/// Profile a CSV file and write the HTML report, returning its path
pub fn run_profile(args: &ProfileArgs) -> Result<PathBuf> {
    let config = args.to_config();
    config.validate()?;

    let table = load_csv(&config.csv_path)?;

    println!("{}", "Visualizing data...".bright_yellow());
    let profile = profile_table(&table, &config);

    write_report(&profile, &config.report_path).with_context(|| {
        format!(
            "Failed to write report {}",
            config.report_path.display()
        )
    })?;

    println!(
        "{} {}. Open this file in a web browser to view the report.",
        "Profile report saved to".bright_green(),
        config.report_path.display()
    );

    Ok(config.report_path)
}
