//! Projection of a standardized table onto the fixed canonical whitelist.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::columns::{CANONICAL_COLUMNS, is_footnote};
use crate::error::SchemaError;
use crate::input::DataTable;

/// Columns removed while locking a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedColumns {
    /// Footnote/annotation columns.
    pub footnotes: Vec<String>,
    /// Any other column outside the whitelist.
    pub other: Vec<String>,
}

impl DroppedColumns {
    pub fn total(&self) -> usize {
        self.footnotes.len() + self.other.len()
    }
}

/// Enforces an exact, ordered column whitelist.
#[derive(Debug, Clone)]
pub struct SchemaLock {
    whitelist: &'static [&'static str],
}

impl SchemaLock {
    /// Lock to the canonical hospital schema.
    pub fn canonical() -> Self {
        Self {
            whitelist: &CANONICAL_COLUMNS,
        }
    }

    /// Lock to a custom whitelist.
    pub fn with_whitelist(whitelist: &'static [&'static str]) -> Self {
        Self { whitelist }
    }

    /// The identifiers every locked table exposes, in order.
    pub fn whitelist(&self) -> &'static [&'static str] {
        self.whitelist
    }

    /// Project `table` onto the whitelist.
    ///
    /// Footnote columns go first, then every whitelisted identifier must match
    /// exactly one remaining header. Output order is always the whitelist's.
    pub fn apply(&self, table: DataTable) -> Result<(DataTable, DroppedColumns), SchemaError> {
        let mut dropped = DroppedColumns::default();
        let kept: Vec<usize> = (0..table.column_count())
            .filter(|&i| {
                let name = &table.headers[i];
                if is_footnote(name) {
                    dropped.footnotes.push(name.clone());
                    false
                } else {
                    true
                }
            })
            .collect();

        let mut missing = Vec::new();
        let mut duplicate = None;
        let mut indices = Vec::with_capacity(self.whitelist.len());

        for &name in self.whitelist {
            let matches: Vec<usize> = kept
                .iter()
                .copied()
                .filter(|&i| table.headers[i] == name)
                .collect();
            match matches.as_slice() {
                [] => missing.push(name.to_string()),
                [index] => indices.push(*index),
                _ => {
                    duplicate.get_or_insert_with(|| name.to_string());
                }
            }
        }

        if !missing.is_empty() {
            return Err(SchemaError::MissingColumns(missing));
        }
        if let Some(name) = duplicate {
            return Err(SchemaError::DuplicateColumn(name));
        }

        for &i in &kept {
            if !indices.contains(&i) {
                dropped.other.push(table.headers[i].clone());
            }
        }

        debug!(
            footnotes = dropped.footnotes.len(),
            other = dropped.other.len(),
            "schema lock dropped columns"
        );

        Ok((table.project(&indices), dropped))
    }
}

impl Default for SchemaLock {
    fn default() -> Self {
        Self::canonical()
    }
}
