//! Rule-based validation of canonical tables.

mod engine;
mod rules;
mod verdict;

pub use engine::ValidationEngine;
pub use rules::{
    BinaryCategoryRule, COMPARISON_LABELS, ComparisonRule, FormatRule, ProviderIdRule, RatingRule,
    Rule, SAMPLE_LIMIT, YES_NO_SYNONYMS,
};
pub use verdict::{Offenders, Report, Verdict};
