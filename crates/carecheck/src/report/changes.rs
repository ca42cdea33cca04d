//! Column-level diff between a raw extract and its cleaned counterpart.

use std::collections::BTreeSet;
use std::fmt::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;

use crate::input::DataTable;
use crate::schema::standardize_column_names;

/// Key fields as labelled in the raw extract.
pub const RAW_KEY_COLUMNS: [&str; 4] = ["Provider ID", "ZIP Code", "Phone Number", "State"];

/// The same key fields in the canonical table.
pub const CLEAN_KEY_COLUMNS: [&str; 4] = ["provider_id", "zip_code", "phone_number", "state"];

/// `(rows, columns)` before and after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShapeDiff {
    pub raw: (usize, usize),
    pub clean: (usize, usize),
}

/// What cleaning did to the column set and to key-field missingness.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeReport {
    pub shape: ShapeDiff,
    /// Columns present on both sides after standardizing raw labels.
    pub common: Vec<String>,
    /// Standardized raw columns absent from the clean table.
    pub dropped: Vec<String>,
    /// Clean columns with no raw counterpart.
    pub added: Vec<String>,
    /// Missing counts of raw key fields that exist.
    pub raw_missing: IndexMap<String, usize>,
    /// Missing counts of clean key fields that exist.
    pub clean_missing: IndexMap<String, usize>,
}

impl ChangeReport {
    /// Compare a raw table against a cleaned one.
    ///
    /// Raw labels go through the same standardizer the cleaning pipeline uses.
    pub fn compare(raw: &DataTable, clean: &DataTable) -> Self {
        let raw_cols: BTreeSet<String> = standardize_column_names(&raw.headers).into_iter().collect();
        let clean_cols: BTreeSet<String> = clean.headers.iter().cloned().collect();

        Self {
            shape: ShapeDiff {
                raw: raw.shape(),
                clean: clean.shape(),
            },
            common: raw_cols.intersection(&clean_cols).cloned().collect(),
            dropped: raw_cols.difference(&clean_cols).cloned().collect(),
            added: clean_cols.difference(&raw_cols).cloned().collect(),
            raw_missing: missing_counts(raw, &RAW_KEY_COLUMNS),
            clean_missing: missing_counts(clean, &CLEAN_KEY_COLUMNS),
        }
    }

    /// Render as text.
    pub fn render(&self, raw_path: &Path, clean_path: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== CHANGE REPORT ===");
        let _ = writeln!(out, "Raw file: {}", raw_path.display());
        let _ = writeln!(out, "Clean file: {}", clean_path.display());
        let _ = writeln!(out);
        let _ = writeln!(out, "Raw shape: {:?}", self.shape.raw);
        let _ = writeln!(out, "Clean shape: {:?}", self.shape.clean);
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "Common columns after standardization ({}): {:?}",
            self.common.len(),
            self.common
        );
        let _ = writeln!(out, "Columns dropped ({}): {:?}", self.dropped.len(), self.dropped);
        let _ = writeln!(out, "Columns added ({}): {:?}", self.added.len(), self.added);
        let _ = writeln!(out);
        let _ = writeln!(out, "Missing counts (raw key fields):");
        let _ = writeln!(out, "{:?}", self.raw_missing);
        let _ = writeln!(out, "Missing counts (clean key fields):");
        let _ = write!(out, "{:?}", self.clean_missing);
        out
    }
}

fn missing_counts(table: &DataTable, columns: &[&str]) -> IndexMap<String, usize> {
    columns
        .iter()
        .filter_map(|&name| {
            let index = table.column_index(name)?;
            Some((name.to_string(), table.missing_count(index)))
        })
        .collect()
}
