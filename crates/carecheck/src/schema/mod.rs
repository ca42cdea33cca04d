//! Canonical schema: column identifiers, the label standardizer and the schema lock.

mod columns;
mod lock;

pub use columns::{
    CANONICAL_COLUMNS, FOOTNOTE_MARKER, NATIONAL_COMPARISON_SUFFIX, is_canonical, is_footnote,
    is_national_comparison, standardize_column_name, standardize_column_names,
};
pub use lock::{DroppedColumns, SchemaLock};
