//! Basic profile of a raw extract.

use std::fmt::Write;

use serde::Serialize;

use crate::input::DataTable;
use crate::schema::standardize_column_name;

/// How many columns the missing-value listing shows.
const MISSING_TOP: usize = 20;

/// Missing cells in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCount {
    pub column: String,
    pub missing: usize,
}

/// Shape, labels, missingness and duplication of a table.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub rows: usize,
    pub columns: usize,
    /// Column labels as read.
    pub labels: Vec<String>,
    /// Columns with the most missing cells, descending; ties keep column order.
    pub missing: Vec<MissingCount>,
    /// Rows repeating an earlier row exactly.
    pub duplicate_rows: usize,
    /// Repeated provider identifiers, when the column exists.
    pub duplicate_provider_ids: Option<usize>,
}

impl ProfileSummary {
    /// Profile a table. The provider column is found by its standardized name,
    /// so `Provider ID` and `provider_id` both qualify.
    pub fn from_table(table: &DataTable) -> Self {
        let mut missing: Vec<MissingCount> = table
            .headers
            .iter()
            .enumerate()
            .map(|(i, column)| MissingCount {
                column: column.clone(),
                missing: table.missing_count(i),
            })
            .collect();
        missing.sort_by(|a, b| b.missing.cmp(&a.missing));
        missing.truncate(MISSING_TOP);

        let provider = table
            .headers
            .iter()
            .position(|h| standardize_column_name(h) == "provider_id");

        Self {
            rows: table.row_count(),
            columns: table.column_count(),
            labels: table.headers.clone(),
            missing,
            duplicate_rows: table.duplicate_row_count(),
            duplicate_provider_ids: provider.map(|i| table.duplicate_value_count(i)),
        }
    }

    /// Render as text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== BASIC PROFILE ===");
        let _ = writeln!(out, "Rows, Cols: ({}, {})", self.rows, self.columns);
        let _ = writeln!(out);
        let _ = writeln!(out, "Columns:");
        let _ = writeln!(out, "{:?}", self.labels);
        let _ = writeln!(out);
        let _ = writeln!(out, "Missing values (top {MISSING_TOP}):");
        let width = self.missing.iter().map(|m| m.column.len()).max().unwrap_or(0);
        for entry in &self.missing {
            let _ = writeln!(out, "{:<width$}  {}", entry.column, entry.missing);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Duplicate rows: {}", self.duplicate_rows);
        let _ = match self.duplicate_provider_ids {
            Some(n) => write!(out, "Duplicate Provider ID: {n}"),
            None => write!(out, "Duplicate Provider ID: N/A"),
        };
        out
    }
}
