//! Per-column descriptive statistics.
//!
//! Columns arrive as raw optional strings. A column is numeric only when
//! every present value parses as a finite `f64`; otherwise it is
//! categorical or free text depending on its distinct count.

use serde::Serialize;
use std::collections::HashMap;

/// Inferred kind of a CSV column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
    Text,
    Empty,
}

impl ColumnKind {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnKind::Numeric => "Numeric",
            ColumnKind::Categorical => "Categorical",
            ColumnKind::Text => "Text",
            ColumnKind::Empty => "Empty",
        }
    }
}

/// Settings that steer column inference and summaries
#[derive(Debug, Clone, Copy)]
pub struct ColumnOptions {
    pub top_values: usize,
    pub histogram_bins: usize,
    pub categorical_threshold: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    /// Share of all rows, in percent
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation, absent below two values
    pub std_dev: Option<f64>,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub zeros: usize,
    pub histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthSummary {
    pub min: usize,
    pub mean: f64,
    pub max: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub present: usize,
    pub missing: usize,
    pub missing_percent: f64,
    pub distinct: usize,
    pub distinct_percent: f64,
    pub top_values: Vec<ValueCount>,
    pub numeric: Option<NumericSummary>,
    pub lengths: Option<LengthSummary>,
}

impl ColumnProfile {
    pub fn rows(&self) -> usize {
        self.present + self.missing
    }

    pub fn missing_ratio(&self) -> f64 {
        ratio(self.missing, self.rows())
    }

    pub fn distinct_ratio(&self) -> f64 {
        ratio(self.distinct, self.present)
    }
}

/// Empty strings count as missing, like empty CSV cells
pub fn present_value(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

/// Parse a cell as a finite number
pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

/// Summarize one column
pub fn profile_column(
    name: &str,
    values: &[Option<String>],
    options: &ColumnOptions,
) -> ColumnProfile {
    let present: Vec<&str> = values.iter().filter_map(present_value).collect();
    let missing = values.len() - present.len();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in &present {
        *counts.entry(*value).or_default() += 1;
    }
    let distinct = counts.len();

    let numbers: Option<Vec<f64>> = if present.is_empty() {
        None
    } else {
        present.iter().map(|v| parse_number(v)).collect()
    };

    let kind = if present.is_empty() {
        ColumnKind::Empty
    } else if numbers.is_some() {
        ColumnKind::Numeric
    } else if distinct <= options.categorical_threshold {
        ColumnKind::Categorical
    } else {
        ColumnKind::Text
    };

    let numeric = numbers
        .as_deref()
        .and_then(|numbers| numeric_summary(numbers, options.histogram_bins));

    let lengths = match kind {
        ColumnKind::Categorical | ColumnKind::Text => length_summary(&present),
        _ => None,
    };

    ColumnProfile {
        name: name.to_string(),
        kind,
        present: present.len(),
        missing,
        missing_percent: percent(missing, values.len()),
        distinct,
        distinct_percent: percent(distinct, present.len()),
        top_values: top_values(counts, values.len(), options.top_values),
        numeric,
        lengths,
    }
}

/// Most frequent values, ties broken alphabetically
fn top_values(counts: HashMap<&str, usize>, rows: usize, limit: usize) -> Vec<ValueCount> {
    let mut counts: Vec<(&str, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    counts
        .into_iter()
        .take(limit)
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
            percent: percent(count, rows),
        })
        .collect()
}

/// Summary statistics for a non-empty set of numbers
pub fn numeric_summary(values: &[f64], bins: usize) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let mean = sorted.iter().sum::<f64>() / n;
    let std_dev = (sorted.len() > 1).then(|| {
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    });

    Some(NumericSummary {
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean,
        std_dev,
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        zeros: sorted.iter().filter(|v| **v == 0.0).count(),
        histogram: histogram(&sorted, bins),
    })
}

/// Linearly interpolated quantile of sorted, non-empty values
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Equal-width bins over sorted, non-empty values
pub fn histogram(sorted: &[f64], bins: usize) -> Vec<HistogramBin> {
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];

    if bins == 0 {
        return Vec::new();
    }
    if min == max {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: sorted.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for value in sorted {
        let index = (((value - min) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }

    result
}

fn length_summary(values: &[&str]) -> Option<LengthSummary> {
    let lengths: Vec<usize> = values.iter().map(|v| v.chars().count()).collect();
    let min = *lengths.iter().min()?;
    let max = *lengths.iter().max()?;
    let mean = lengths.iter().sum::<usize>() as f64 / lengths.len() as f64;
    Some(LengthSummary { min, mean, max })
}
