//! Rowlens statistical profiling engine.
//!
//! [`profile`] is a pure function of a table's contents: column type
//! inference, missing-value accounting, descriptive statistics for numeric
//! columns, and a Pearson correlation panel. Callers that want to swap or
//! observe the computation (the report generator's cache tests do) depend
//! on the [`Profiler`] trait instead of the function.

pub mod stats;
pub mod types;

pub use types::{ColumnProfile, ColumnType, CorrelationEntry, NumericSummary, TableProfile};

use rl_common::Dataset;
use std::collections::HashSet;

/// The profiling computation as a collaborator seam.
pub trait Profiler {
    fn profile(&self, dataset: &Dataset) -> TableProfile;
}

/// The built-in engine.
#[derive(Debug, Default)]
pub struct StatsProfiler;

impl Profiler for StatsProfiler {
    fn profile(&self, dataset: &Dataset) -> TableProfile {
        profile(dataset)
    }
}

/// Whether a cell counts as missing.
pub fn is_missing(cell: &str) -> bool {
    cell.trim().is_empty()
}

const WORD_BOOL_TOKENS: [&str; 4] = ["true", "false", "yes", "no"];

fn is_word_bool(cell: &str) -> bool {
    WORD_BOOL_TOKENS
        .iter()
        .any(|t| cell.eq_ignore_ascii_case(t))
}

fn is_bool_token(cell: &str) -> bool {
    is_word_bool(cell) || cell == "0" || cell == "1"
}

/// Streaming per-column accumulator.
#[derive(Debug, Default)]
struct ColumnAccumulator {
    missing: usize,
    seen: usize,
    distinct: HashSet<String>,
    example: Option<String>,
    numeric_values: Vec<f64>,
    all_integer: bool,
    all_float: bool,
    all_bool: bool,
    any_word_bool: bool,
}

impl ColumnAccumulator {
    fn new() -> Self {
        Self {
            all_integer: true,
            all_float: true,
            all_bool: true,
            ..Self::default()
        }
    }

    fn observe(&mut self, cell: &str) {
        if is_missing(cell) {
            self.missing += 1;
            return;
        }
        let cell = cell.trim();
        self.seen += 1;

        if self.example.is_none() {
            self.example = Some(cell.to_string());
        }
        self.distinct.insert(cell.to_string());

        self.all_integer &= cell.parse::<i64>().is_ok();
        match cell.parse::<f64>() {
            Ok(v) if v.is_finite() => self.numeric_values.push(v),
            _ => self.all_float = false,
        }
        self.all_bool &= is_bool_token(cell);
        self.any_word_bool |= is_word_bool(cell);
    }

    fn inferred_type(&self) -> ColumnType {
        if self.seen == 0 {
            ColumnType::Unknown
        } else if self.all_bool && self.any_word_bool {
            // A column of bare 0/1 stays numeric; word forms make it boolean
            ColumnType::Boolean
        } else if self.all_integer {
            ColumnType::Integer
        } else if self.all_float {
            ColumnType::Float
        } else {
            ColumnType::Text
        }
    }

    fn finish(self, name: &str, row_count: usize) -> ColumnProfile {
        let inferred_type = self.inferred_type();
        let numeric = if inferred_type.is_numeric() {
            numeric_summary(&self.numeric_values)
        } else {
            None
        };
        let missing_rate = if row_count == 0 {
            0.0
        } else {
            self.missing as f64 / row_count as f64
        };

        ColumnProfile {
            name: name.to_string(),
            inferred_type,
            missing_count: self.missing,
            missing_rate,
            distinct_count: self.distinct.len(),
            example: self.example,
            numeric,
        }
    }
}

fn numeric_summary(values: &[f64]) -> Option<NumericSummary> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(NumericSummary {
        count: values.len(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: stats::mean(values)?,
        std: stats::sample_std(values),
        q1: stats::quantile(&sorted, 0.25)?,
        median: stats::quantile(&sorted, 0.5)?,
        q3: stats::quantile(&sorted, 0.75)?,
    })
}

/// Compute the full profile for a dataset.
pub fn profile(dataset: &Dataset) -> TableProfile {
    let row_count = dataset.row_count();
    let mut accumulators: Vec<ColumnAccumulator> = dataset
        .column_names()
        .iter()
        .map(|_| ColumnAccumulator::new())
        .collect();

    for row in dataset.rows() {
        for (acc, cell) in accumulators.iter_mut().zip(row) {
            acc.observe(cell);
        }
    }

    let columns: Vec<ColumnProfile> = dataset
        .column_names()
        .iter()
        .zip(accumulators)
        .map(|(name, acc)| acc.finish(name, row_count))
        .collect();

    let total_missing = columns.iter().map(|c| c.missing_count).sum();
    let correlations = correlation_panel(dataset, &columns);

    TableProfile {
        row_count,
        column_count: dataset.column_count(),
        total_missing,
        columns,
        correlations,
    }
}

/// Pairwise Pearson correlations between numeric columns, computed over
/// rows where both cells parse.
fn correlation_panel(dataset: &Dataset, columns: &[ColumnProfile]) -> Vec<CorrelationEntry> {
    let numeric: Vec<usize> = columns
        .iter()
        .enumerate()
        .filter(|(_, c)| c.inferred_type.is_numeric())
        .map(|(idx, _)| idx)
        .collect();

    let mut panel = Vec::new();
    for (i, &left) in numeric.iter().enumerate() {
        for &right in &numeric[i + 1..] {
            let mut xs = Vec::new();
            let mut ys = Vec::new();
            for row in dataset.rows() {
                let (Some(x), Some(y)) = (parse_cell(row.get(left)), parse_cell(row.get(right)))
                else {
                    continue;
                };
                xs.push(x);
                ys.push(y);
            }
            if let Some(r) = stats::pearson(&xs, &ys) {
                panel.push(CorrelationEntry {
                    left: columns[left].name.clone(),
                    right: columns[right].name.clone(),
                    r,
                });
            }
        }
    }
    panel
}

fn parse_cell(cell: Option<&String>) -> Option<f64> {
    let cell = cell?.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}
