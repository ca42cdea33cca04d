//! Raw → canonical transformation: field normalizers and the cleaning pipeline.

mod cleaner;
mod normalizers;
mod summary;

pub use cleaner::{CleanedTable, CleaningPipeline};
pub use normalizers::{
    Normalizer, TEXT_COLUMNS, normalize_phone, normalize_state, normalize_text, normalize_zip,
};
pub use summary::{CleaningSummary, ColumnChange};
