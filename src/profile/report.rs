//! HTML rendering of a dataset profile.
//!
//! The template is compiled into the binary and rendered with tera.
//! Numbers are formatted here so the template only lays out strings.

use super::DatasetProfile;
use super::column::{ColumnKind, ColumnProfile};
use crate::constants::REPORT_TEMPLATE_NAME;
use crate::error::Result;

use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};
use tracing::debug;

#[derive(Serialize)]
struct ReportContext<'a> {
    title: &'a str,
    source: String,
    generated_at: &'a str,
    overview: Vec<StatRow>,
    kinds: Vec<StatRow>,
    alerts: Vec<AlertView<'a>>,
    columns: Vec<ColumnView<'a>>,
    correlations: Option<CorrelationView<'a>>,
    sample_headers: &'a [String],
    sample_rows: &'a [Vec<String>],
}

#[derive(Serialize)]
struct StatRow {
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct AlertView<'a> {
    column: &'a str,
    kind: String,
    message: &'a str,
}

#[derive(Serialize)]
struct BarView {
    label: String,
    count: usize,
    percent: String,
    /// Bar width relative to the largest bar, 0-100
    width: u32,
}

#[derive(Serialize)]
struct ColumnView<'a> {
    anchor: String,
    name: &'a str,
    kind: &'static str,
    stats: Vec<StatRow>,
    details: Vec<StatRow>,
    top_values: Vec<BarView>,
    histogram: Vec<BarView>,
}

#[derive(Serialize)]
struct CorrelationCell {
    value: String,
    /// "pos", "neg" or "none" for colouring
    class: &'static str,
    /// Background opacity, 0-1
    alpha: String,
}

#[derive(Serialize)]
struct CorrelationRow<'a> {
    name: &'a str,
    cells: Vec<CorrelationCell>,
}

#[derive(Serialize)]
struct CorrelationView<'a> {
    columns: &'a [String],
    rows: Vec<CorrelationRow<'a>>,
}

/// Format a float with at most four decimals and no trailing zeros
pub fn format_number(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

fn bar_width(count: usize, largest: usize) -> u32 {
    if largest == 0 {
        0
    } else {
        ((count as f64 / largest as f64) * 100.0).round() as u32
    }
}

fn stat(label: &'static str, value: impl ToString) -> StatRow {
    StatRow {
        label,
        value: value.to_string(),
    }
}

fn anchor(index: usize) -> String {
    format!("col-{}", index)
}

fn column_view(index: usize, column: &ColumnProfile) -> ColumnView<'_> {
    let stats = vec![
        stat("Present", column.present),
        stat(
            "Missing",
            format!("{} ({})", column.missing, format_percent(column.missing_percent)),
        ),
        stat(
            "Distinct",
            format!(
                "{} ({})",
                column.distinct,
                format_percent(column.distinct_percent)
            ),
        ),
    ];

    let mut details = Vec::new();
    if let Some(numeric) = &column.numeric {
        details.push(stat("Mean", format_number(numeric.mean)));
        details.push(stat(
            "Std. deviation",
            numeric.std_dev.map_or_else(|| "-".to_string(), format_number),
        ));
        details.push(stat("Minimum", format_number(numeric.min)));
        details.push(stat("25th percentile", format_number(numeric.q1)));
        details.push(stat("Median", format_number(numeric.median)));
        details.push(stat("75th percentile", format_number(numeric.q3)));
        details.push(stat("Maximum", format_number(numeric.max)));
        details.push(stat("Zeros", numeric.zeros));
    }
    if let Some(lengths) = &column.lengths {
        details.push(stat("Min length", lengths.min));
        details.push(stat("Mean length", format_number(lengths.mean)));
        details.push(stat("Max length", lengths.max));
    }

    let largest_value = column.top_values.first().map_or(0, |v| v.count);
    let top_values: Vec<BarView> = column
        .top_values
        .iter()
        .map(|v| BarView {
            label: v.value.clone(),
            count: v.count,
            percent: format_percent(v.percent),
            width: bar_width(v.count, largest_value),
        })
        .collect();

    let histogram: Vec<BarView> = column
        .numeric
        .as_ref()
        .map(|numeric| {
            let largest = numeric.histogram.iter().map(|b| b.count).max().unwrap_or(0);
            numeric
                .histogram
                .iter()
                .map(|bin| BarView {
                    label: format!(
                        "{} to {}",
                        format_number(bin.lower),
                        format_number(bin.upper)
                    ),
                    count: bin.count,
                    percent: format_percent(super::column::percent(bin.count, column.present)),
                    width: bar_width(bin.count, largest),
                })
                .collect()
        })
        .unwrap_or_default();

    ColumnView {
        anchor: anchor(index),
        name: &column.name,
        kind: column.kind.label(),
        stats,
        details,
        top_values,
        histogram,
    }
}

fn correlation_view(profile: &DatasetProfile) -> Option<CorrelationView<'_>> {
    let matrix = &profile.correlations;
    if matrix.columns.len() < 2 {
        return None;
    }

    let rows = matrix
        .columns
        .iter()
        .zip(&matrix.values)
        .map(|(name, values)| CorrelationRow {
            name,
            cells: values
                .iter()
                .map(|value| match value {
                    Some(r) => CorrelationCell {
                        value: format!("{:.2}", r),
                        class: if *r < 0.0 { "neg" } else { "pos" },
                        alpha: format!("{:.2}", r.abs()),
                    },
                    None => CorrelationCell {
                        value: "-".to_string(),
                        class: "none",
                        alpha: "0".to_string(),
                    },
                })
                .collect(),
        })
        .collect();

    Some(CorrelationView {
        columns: &matrix.columns,
        rows,
    })
}

fn report_context(profile: &DatasetProfile) -> ReportContext<'_> {
    let overview = &profile.overview;

    ReportContext {
        title: &profile.title,
        source: profile.source.display().to_string(),
        generated_at: &profile.generated_at,
        overview: vec![
            stat("Rows", overview.rows),
            stat("Columns", overview.columns),
            stat("Missing cells", overview.missing_cells),
            stat("Missing cells (%)", format_percent(overview.missing_percent)),
            stat("Duplicate rows", overview.duplicate_rows),
            stat("Duplicate rows (%)", format_percent(overview.duplicate_percent)),
        ],
        kinds: vec![
            stat(ColumnKind::Numeric.label(), overview.numeric_columns),
            stat(ColumnKind::Categorical.label(), overview.categorical_columns),
            stat(ColumnKind::Text.label(), overview.text_columns),
            stat(ColumnKind::Empty.label(), overview.empty_columns),
        ],
        alerts: profile
            .alerts
            .iter()
            .map(|alert| AlertView {
                column: &alert.column,
                kind: format!("{:?}", alert.kind),
                message: &alert.message,
            })
            .collect(),
        columns: profile
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| column_view(i, column))
            .collect(),
        correlations: correlation_view(profile),
        sample_headers: &profile.sample.headers,
        sample_rows: &profile.sample.rows,
    }
}

/// Render the profile as a self-contained HTML document
pub fn render_html(profile: &DatasetProfile) -> Result<String> {
    let mut tera = Tera::default();
    tera.add_raw_template(
        REPORT_TEMPLATE_NAME,
        include_str!("../../templates/report.html"),
    )?;

    let context = Context::from_serialize(report_context(profile))?;
    let html = tera.render(REPORT_TEMPLATE_NAME, &context)?;

    debug!("Rendered report of {} bytes", html.len());
    Ok(html)
}

/// Render the profile and write it to `path`
pub fn write_report(profile: &DatasetProfile, path: &Path) -> Result<()> {
    let html = render_html(profile)?;
    std::fs::write(path, html)?;
    Ok(())
}
