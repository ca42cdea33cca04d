//! Text artifacts: validation report, profile summary and change report.

mod changes;
mod profile;
mod validation;

pub use changes::{CLEAN_KEY_COLUMNS, ChangeReport, RAW_KEY_COLUMNS, ShapeDiff};
pub use profile::{MissingCount, ProfileSummary};
pub use validation::render_validation_report;
