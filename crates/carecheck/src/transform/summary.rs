//! Bookkeeping for what a cleaning run changed.

use serde::{Deserialize, Serialize};

use super::normalizers::Normalizer;
use crate::schema::DroppedColumns;

/// Values rewritten in one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnChange {
    /// Canonical column name.
    pub column: String,

    /// Normalizer that ran.
    pub normalizer: Normalizer,

    /// Number of cells whose value differs after normalization.
    pub values_changed: usize,

    /// How many of those became missing.
    pub values_blanked: usize,
}

/// Result of a cleaning run, alongside the canonical table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Per-column normalization changes, in column order.
    pub changes: Vec<ColumnChange>,

    /// Columns removed by the schema lock.
    pub dropped: DroppedColumns,

    /// Raw header labels that were renamed by standardization.
    pub renamed: usize,
}

impl CleaningSummary {
    /// Create an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a column change.
    pub fn add_change(&mut self, change: ColumnChange) {
        self.changes.push(change);
    }

    /// Total cells rewritten across all columns.
    pub fn values_changed(&self) -> usize {
        self.changes.iter().map(|c| c.values_changed).sum()
    }

    /// Change record for a column, if it was normalized.
    pub fn change_for(&self, column: &str) -> Option<&ColumnChange> {
        self.changes.iter().find(|c| c.column == column)
    }
}
