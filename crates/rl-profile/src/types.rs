//! Profile result types.

use serde::{Deserialize, Serialize};

/// Inferred type of a column, decided over its non-missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// All cells parse as 64-bit integers.
    Integer,
    /// All cells parse as floats (mixed int/float content lands here).
    Float,
    /// All cells are boolean tokens, with at least one word form.
    Boolean,
    /// Anything else.
    Text,
    /// No non-missing cells to infer from.
    Unknown,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "integer"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Boolean => write!(f, "boolean"),
            ColumnType::Text => write!(f, "text"),
            ColumnType::Unknown => write!(f, "unknown"),
        }
    }
}

impl ColumnType {
    /// Whether the column participates in numeric summaries and the
    /// correlation panel.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Integer | ColumnType::Float)
    }
}

/// Descriptive statistics over a numeric column's parseable cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    /// Cells that parsed as numbers.
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Sample standard deviation; absent below two values.
    pub std: Option<f64>,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Per-column profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub inferred_type: ColumnType,
    /// Empty or whitespace-only cells.
    pub missing_count: usize,
    /// Missing cells as a fraction of the row count (0 when no rows).
    pub missing_rate: f64,
    /// Distinct non-missing values.
    pub distinct_count: usize,
    /// First non-missing value seen, for display.
    pub example: Option<String>,
    /// Present only for numeric columns.
    pub numeric: Option<NumericSummary>,
}

/// One cell of the correlation panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub left: String,
    pub right: String,
    /// Pearson r over rows where both cells parse.
    pub r: f64,
}

/// The computed exploratory-analysis artifact for one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableProfile {
    pub row_count: usize,
    pub column_count: usize,
    /// Missing cells across all columns.
    pub total_missing: usize,
    pub columns: Vec<ColumnProfile>,
    /// Pairwise Pearson correlations between numeric columns; degenerate
    /// pairs are omitted rather than reported as NaN.
    pub correlations: Vec<CorrelationEntry>,
}

impl TableProfile {
    /// Missing cells as a fraction of all cells (0 for an empty table).
    pub fn missing_rate(&self) -> f64 {
        let cells = self.row_count * self.column_count;
        if cells == 0 {
            0.0
        } else {
            self.total_missing as f64 / cells as f64
        }
    }
}
