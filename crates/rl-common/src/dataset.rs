//! The in-memory tabular dataset.
//!
//! A [`Dataset`] is parsed once from delimited text with a header row and is
//! immutable afterwards; loading a new source replaces it wholesale. Cells
//! are kept as strings — type interpretation belongs to the profiler, not
//! the loader.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// An immutable table with named columns and an ordered sequence of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Parse a CSV byte stream with a header row.
    ///
    /// Rows must be rectangular; a ragged or otherwise malformed record
    /// fails the whole load (no partial-result semantics).
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(false).from_reader(bytes);

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| Error::Parse(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        if columns.is_empty() {
            return Err(Error::Parse("input has no header row".to_string()));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(Dataset { columns, rows })
    }

    /// Build a dataset from already-split parts. Intended for tests and for
    /// internal prefix construction; rows must match the column count.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::Parse("dataset needs at least one column".to_string()));
        }
        if let Some(bad) = rows.iter().find(|r| r.len() != columns.len()) {
            return Err(Error::Parse(format!(
                "row has {} cells, expected {}",
                bad.len(),
                columns.len()
            )));
        }
        Ok(Dataset { columns, rows })
    }

    /// Number of data rows (the header does not count).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// All rows in table order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Position of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at (row, column), if in bounds.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows.get(row)?.get(column).map(String::as_str)
    }

    /// Values of one column in row order.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .filter_map(move |r| r.get(column).map(String::as_str))
    }

    /// Order-preserving prefix of the first `n` rows as a new dataset.
    ///
    /// Returns the table unchanged (cloned) when it already has `n` rows or
    /// fewer. This is the chunking primitive: always the leading rows,
    /// never a sample.
    pub fn head(&self, n: usize) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Content-derived identity: hex-encoded SHA-256 over the table's
    /// dimensions, header, and every cell.
    ///
    /// Cells are length-prefixed before hashing so `["ab","c"]` and
    /// `["a","bc"]` do not collide. Two datasets fingerprint equal iff
    /// their visible contents are equal, which is what makes this usable
    /// as a memoization key.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.columns.len() as u64).to_le_bytes());
        hasher.update((self.rows.len() as u64).to_le_bytes());
        for name in &self.columns {
            hasher.update((name.len() as u64).to_le_bytes());
            hasher.update(name.as_bytes());
        }
        for row in &self.rows {
            for cell in row {
                hasher.update((cell.len() as u64).to_le_bytes());
                hasher.update(cell.as_bytes());
            }
        }
        hex::encode(hasher.finalize())
    }
}
