//! Data source abstraction and metadata.

use std::collections::HashSet;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about a file that has been read into a [`DataTable`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Text encoding the file was decoded with.
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was read.
    pub read_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        encoding: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            encoding,
            row_count,
            column_count,
            read_at: Utc::now(),
        }
    }
}

/// In-memory tabular data.
///
/// Cells are `None` when they carry the missing marker, which is distinct from
/// a present empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data (row-major order).
    pub rows: Vec<Vec<Option<String>>>,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from borrowed literals. Mostly useful in tests.
    pub fn from_literals(headers: &[&str], rows: &[Vec<Option<&str>>]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.map(str::to_string)).collect())
                .collect(),
        }
    }

    /// Build a single-column table.
    pub fn single_column(name: &str, values: &[Option<&str>]) -> Self {
        Self {
            headers: vec![name.to_string()],
            rows: values.iter().map(|v| vec![v.map(str::to_string)]).collect(),
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.row_count(), self.column_count())
    }

    /// Index of the first column with the given header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column with the given header exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = Option<&str>> {
        self.rows
            .iter()
            .map(move |row| row.get(index).and_then(|cell| cell.as_deref()))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value. `None` covers both out-of-range and missing.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .and_then(|cell| cell.as_deref())
    }

    /// Replace every value of a column.
    pub(crate) fn replace_column(&mut self, index: usize, values: Vec<Option<String>>) {
        for (row, value) in self.rows.iter_mut().zip(values) {
            if let Some(cell) = row.get_mut(index) {
                *cell = value;
            }
        }
    }

    /// Keep only the given columns, in the given order.
    pub(crate) fn project(self, indices: &[usize]) -> Self {
        let headers = indices.iter().map(|&i| self.headers[i].clone()).collect();
        let rows = self
            .rows
            .into_iter()
            .map(|mut row| {
                indices
                    .iter()
                    .map(|&i| row.get_mut(i).and_then(Option::take))
                    .collect()
            })
            .collect();
        Self { headers, rows }
    }

    /// Count missing cells in a column.
    pub fn missing_count(&self, index: usize) -> usize {
        self.column_values(index).filter(Option::is_none).count()
    }

    /// Count rows that repeat an earlier row exactly (missing equals missing).
    pub fn duplicate_row_count(&self) -> usize {
        let mut seen: HashSet<&[Option<String>]> = HashSet::new();
        self.rows
            .iter()
            .filter(|row| !seen.insert(row.as_slice()))
            .count()
    }

    /// Count non-missing values in a column that repeat an earlier value.
    pub fn duplicate_value_count(&self, index: usize) -> usize {
        let mut seen: HashSet<&str> = HashSet::new();
        self.column_values(index)
            .flatten()
            .filter(|value| !seen.insert(value))
            .count()
    }
}
