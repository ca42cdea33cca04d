//! The cleaning pipeline: standardize labels, normalize fields, lock the schema.

use tracing::{debug, info};

use super::normalizers::Normalizer;
use super::summary::{ColumnChange, CleaningSummary};
use crate::error::Result;
use crate::input::DataTable;
use crate::schema::{SchemaLock, standardize_column_name};

/// A canonical table and what it took to produce it.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    /// The canonical table. Headers equal the lock's whitelist.
    pub table: DataTable,
    /// What changed along the way.
    pub summary: CleaningSummary,
}

/// Deterministic raw → canonical transformation.
pub struct CleaningPipeline {
    lock: SchemaLock,
}

impl CleaningPipeline {
    /// Create a pipeline that locks to the canonical schema.
    pub fn new() -> Self {
        Self {
            lock: SchemaLock::canonical(),
        }
    }

    /// Create a pipeline with a custom schema lock.
    pub fn with_lock(lock: SchemaLock) -> Self {
        Self { lock }
    }

    /// Clean a raw table.
    ///
    /// Takes ownership: the raw table is consumed and the canonical table is
    /// built from it. Fails only when the schema lock cannot be satisfied.
    pub fn clean(&self, mut table: DataTable) -> Result<CleanedTable> {
        let mut summary = CleaningSummary::new();

        summary.renamed = standardize_headers(&mut table);

        for index in 0..table.column_count() {
            let Some(normalizer) = Normalizer::for_column(&table.headers[index]) else {
                continue;
            };
            let change = normalize_column(&mut table, index, normalizer);
            debug!(
                column = %change.column,
                normalizer = normalizer.label(),
                changed = change.values_changed,
                blanked = change.values_blanked,
                "normalized column"
            );
            summary.add_change(change);
        }

        let (table, dropped) = self.lock.apply(table)?;
        summary.dropped = dropped;

        info!(
            rows = table.row_count(),
            columns = table.column_count(),
            values_changed = summary.values_changed(),
            dropped = summary.dropped.total(),
            "cleaned table"
        );

        Ok(CleanedTable { table, summary })
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Rewrite every header through the column standardizer. Returns how many changed.
fn standardize_headers(table: &mut DataTable) -> usize {
    let mut renamed = 0;
    for header in &mut table.headers {
        let standardized = standardize_column_name(header);
        if *header != standardized {
            *header = standardized;
            renamed += 1;
        }
    }
    renamed
}

fn normalize_column(table: &mut DataTable, index: usize, normalizer: Normalizer) -> ColumnChange {
    let mut values_changed = 0;
    let mut values_blanked = 0;

    let normalized: Vec<Option<String>> = table
        .column_values(index)
        .map(|value| {
            let out = normalizer.apply(value);
            if out.as_deref() != value {
                values_changed += 1;
                if out.is_none() {
                    values_blanked += 1;
                }
            }
            out
        })
        .collect();

    table.replace_column(index, normalized);

    ColumnChange {
        column: table.headers[index].clone(),
        normalizer,
        values_changed,
        values_blanked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CarecheckError, SchemaError};
    use crate::schema::CANONICAL_COLUMNS;

    const RAW_HEADERS: [&str; 22] = [
        "Provider ID",
        "Hospital Name",
        "Address",
        "City",
        "State",
        "ZIP Code",
        "County Name",
        "Phone Number",
        "Hospital Type",
        "Hospital Ownership",
        "Emergency Services",
        "Meets criteria for meaningful use of EHRs",
        "Hospital overall rating",
        "Hospital overall rating footnote",
        "Mortality national comparison",
        "Safety of care national comparison",
        "Readmission national comparison",
        "Patient experience national comparison",
        "Effectiveness of care national comparison",
        "Timeliness of care national comparison",
        "Efficient use of medical imaging national comparison",
        "Location",
    ];

    fn raw_row() -> Vec<Option<&'static str>> {
        vec![
            Some("010001"),
            Some("  SOUTHEAST ALABAMA   MEDICAL CENTER "),
            Some("1108 ROSS CLARK CIRCLE"),
            Some("DOTHAN"),
            Some(" al"),
            Some("36301-1234"),
            Some("HOUSTON"),
            Some("1 (334) 793-8701"),
            Some("Acute Care Hospitals"),
            Some("Government - Hospital District or Authority"),
            Some("Yes"),
            Some("Y"),
            Some("3"),
            None,
            Some("Same as the national average"),
            Some("Above the national average"),
            Some("Same as the national average"),
            Some("Below the national average"),
            Some("Same as the national average"),
            Some("Same as the national average"),
            Some("Below the national average"),
            Some("1108 ROSS CLARK CIRCLE DOTHAN, AL"),
        ]
    }

    #[test]
    fn test_clean_full_row() {
        let raw = DataTable::from_literals(&RAW_HEADERS, &[raw_row()]);
        let cleaned = CleaningPipeline::new().clean(raw).unwrap();
        let table = &cleaned.table;

        assert_eq!(table.headers, CANONICAL_COLUMNS);
        assert_eq!(table.get(0, 1), Some("SOUTHEAST ALABAMA MEDICAL CENTER"));
        assert_eq!(table.get(0, 4), Some("AL"));
        assert_eq!(table.get(0, 5), Some("36301"));
        assert_eq!(table.get(0, 7), Some("3347938701"));
        assert_eq!(table.get(0, 12), Some("3"));

        let summary = &cleaned.summary;
        assert_eq!(summary.renamed, RAW_HEADERS.len());
        assert_eq!(summary.dropped.footnotes, vec!["hospital_overall_rating_footnote"]);
        assert_eq!(summary.dropped.other, vec!["location"]);
        assert_eq!(summary.change_for("state").unwrap().values_changed, 1);
        assert_eq!(summary.change_for("city").unwrap().values_changed, 0);
        assert!(summary.change_for("provider_id").is_none());
    }

    #[test]
    fn test_bad_phone_is_blanked() {
        let mut row = raw_row();
        row[7] = Some("793-8701");
        let raw = DataTable::from_literals(&RAW_HEADERS, &[row]);
        let cleaned = CleaningPipeline::new().clean(raw).unwrap();

        assert_eq!(cleaned.table.get(0, 7), None);
        let change = cleaned.summary.change_for("phone_number").unwrap();
        assert_eq!(change.values_blanked, 1);
    }

    #[test]
    fn test_missing_column_aborts() {
        let headers: Vec<&str> = RAW_HEADERS
            .iter()
            .copied()
            .filter(|h| *h != "Phone Number")
            .collect();
        let mut row = raw_row();
        row.remove(7);
        let raw = DataTable::from_literals(&headers, &[row]);

        match CleaningPipeline::new().clean(raw) {
            Err(CarecheckError::Schema(SchemaError::MissingColumns(cols))) => {
                assert_eq!(cols, vec!["phone_number"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_clean_is_idempotent() {
        let raw = DataTable::from_literals(&RAW_HEADERS, &[raw_row()]);
        let pipeline = CleaningPipeline::new();
        let once = pipeline.clean(raw).unwrap().table;
        let twice = pipeline.clean(once.clone()).unwrap();

        assert_eq!(twice.table, once);
        assert_eq!(twice.summary.values_changed(), 0);
        assert_eq!(twice.summary.renamed, 0);
    }
}
