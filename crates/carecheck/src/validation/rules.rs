//! Validation rules for the canonical hospital table.
//!
//! Each rule inspects one or more columns and returns one verdict per check.
//! A rule whose column is absent reports that as a failure instead of erroring.

use std::ops::RangeInclusive;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use super::verdict::Verdict;
use crate::input::DataTable;
use crate::schema::NATIONAL_COMPARISON_SUFFIX;

/// Maximum offenders kept on a verdict.
pub const SAMPLE_LIMIT: usize = 10;

/// Labels a national comparison column may take.
pub const COMPARISON_LABELS: [&str; 6] = [
    "Above the national average",
    "Same as the national average",
    "Below the national average",
    "Not Available",
    "Number of Cases Too Small",
    "Not Applicable",
];

/// Case-insensitive synonyms for the emergency services flag.
pub const YES_NO_SYNONYMS: &[(&str, &str)] = &[("yes", "Yes"), ("no", "No")];

pub(crate) static PROVIDER_ID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{6}$").unwrap());
pub(crate) static ZIP_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{5}$").unwrap());
pub(crate) static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());
pub(crate) static STATE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{2}$").unwrap());

/// A validation rule evaluated against a whole table.
pub trait Rule {
    /// Stable name, shared by instances of the same kind.
    fn name(&self) -> &'static str;

    /// Evaluate and return verdicts in presentation order.
    fn evaluate(&self, table: &DataTable) -> Vec<Verdict>;
}

fn missing_column(rule: &'static str, column: &str) -> Verdict {
    Verdict::fail(rule, 1, format!("Missing required column: {column}")).with_column(column)
}

fn examples<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values.take(SAMPLE_LIMIT).map(str::to_string).collect()
}

/// Count values, most frequent first. Ties keep first-seen order.
fn top_values<'a>(values: impl Iterator<Item = &'a str>) -> IndexMap<String, usize> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in values {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts.sort_by(|_, a, _, b| b.cmp(a));
    counts.truncate(SAMPLE_LIMIT);
    counts
}

/// Provider identifier: complete, unique and six digits.
pub struct ProviderIdRule {
    column: String,
}

impl ProviderIdRule {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl Default for ProviderIdRule {
    fn default() -> Self {
        Self::new("provider_id")
    }
}

impl Rule for ProviderIdRule {
    fn name(&self) -> &'static str {
        "provider_id"
    }

    fn evaluate(&self, table: &DataTable) -> Vec<Verdict> {
        let col = &self.column;
        let Some(index) = table.column_index(col) else {
            return vec![missing_column(self.name(), col)];
        };

        let mut verdicts = Vec::with_capacity(3);

        let missing = table.missing_count(index);
        verdicts.push(if missing == 0 {
            Verdict::pass(self.name(), format!("{col} has 0 missing values"))
        } else {
            Verdict::fail(self.name(), missing, format!("{col} missing values: {missing}"))
        });

        let duplicates = table.duplicate_value_count(index);
        verdicts.push(if duplicates == 0 {
            Verdict::pass(self.name(), format!("{col} is unique (0 duplicates)"))
        } else {
            Verdict::fail(self.name(), duplicates, format!("{col} duplicates: {duplicates}"))
        });

        let bad: Vec<&str> = table
            .column_values(index)
            .flatten()
            .filter(|v| !PROVIDER_ID_PATTERN.is_match(v))
            .collect();
        verdicts.push(if bad.is_empty() {
            Verdict::pass(self.name(), format!("{col} format is 6 digits"))
        } else {
            let sample = examples(bad.iter().copied());
            Verdict::fail(
                self.name(),
                bad.len(),
                format!("{col} not 6 digits: {} examples={sample:?}", bad.len()),
            )
            .with_examples(sample)
        });

        verdicts
            .into_iter()
            .map(|v| v.with_column(col.as_str()))
            .collect()
    }
}

/// Every present value must match a pattern; missing values are exempt.
pub struct FormatRule {
    column: String,
    pattern: Regex,
}

impl FormatRule {
    pub fn new(column: impl Into<String>, pattern: Regex) -> Self {
        Self {
            column: column.into(),
            pattern,
        }
    }

    /// Five-digit ZIP code.
    pub fn zip_code() -> Self {
        Self::new("zip_code", ZIP_PATTERN.clone())
    }

    /// Ten-digit phone number.
    pub fn phone_number() -> Self {
        Self::new("phone_number", PHONE_PATTERN.clone())
    }

    /// Two-letter upper-case state code.
    pub fn state() -> Self {
        Self::new("state", STATE_PATTERN.clone())
    }
}

impl Rule for FormatRule {
    fn name(&self) -> &'static str {
        "format"
    }

    fn evaluate(&self, table: &DataTable) -> Vec<Verdict> {
        let col = &self.column;
        let Some(index) = table.column_index(col) else {
            return vec![missing_column(self.name(), col)];
        };

        let bad: Vec<&str> = table
            .column_values(index)
            .flatten()
            .filter(|v| !self.pattern.is_match(v))
            .collect();

        let verdict = if bad.is_empty() {
            Verdict::pass(self.name(), format!("{col} format valid (0 bad)"))
        } else {
            let sample = examples(bad.iter().copied());
            Verdict::fail(
                self.name(),
                bad.len(),
                format!("{col} format invalid: {} examples={sample:?}", bad.len()),
            )
            .with_examples(sample)
        };
        vec![verdict.with_column(col.as_str())]
    }
}

/// Present values must be whole numbers in a range. `"5.0"` counts as 5.
pub struct RatingRule {
    column: String,
    allowed: RangeInclusive<i64>,
}

impl RatingRule {
    pub fn new(column: impl Into<String>, allowed: RangeInclusive<i64>) -> Self {
        Self {
            column: column.into(),
            allowed,
        }
    }

    fn is_valid(&self, value: &str) -> bool {
        match value.trim().parse::<f64>() {
            Ok(n) if n.is_finite() && n.fract() == 0.0 => {
                let whole = n as i64;
                self.allowed.contains(&whole) && whole as f64 == n
            }
            _ => false,
        }
    }
}

impl Default for RatingRule {
    fn default() -> Self {
        Self::new("hospital_overall_rating", 1..=5)
    }
}

impl Rule for RatingRule {
    fn name(&self) -> &'static str {
        "rating"
    }

    fn evaluate(&self, table: &DataTable) -> Vec<Verdict> {
        let col = &self.column;
        let Some(index) = table.column_index(col) else {
            return vec![missing_column(self.name(), col)];
        };

        let bad: Vec<&str> = table
            .column_values(index)
            .flatten()
            .filter(|v| !self.is_valid(v))
            .collect();

        let (lo, hi) = (self.allowed.start(), self.allowed.end());
        let verdict = if bad.is_empty() {
            Verdict::pass(self.name(), format!("{col} values are {lo}–{hi} or null"))
        } else {
            let sample = examples(bad.iter().copied());
            Verdict::fail(
                self.name(),
                bad.len(),
                format!("{col} invalid values: {} examples={sample:?}", bad.len()),
            )
            .with_examples(sample)
        };
        vec![verdict.with_column(col.as_str())]
    }
}

/// A two-valued category with a case-insensitive synonym map.
pub struct BinaryCategoryRule {
    column: String,
    synonyms: &'static [(&'static str, &'static str)],
    allowed: [&'static str; 2],
}

impl BinaryCategoryRule {
    pub fn new(
        column: impl Into<String>,
        synonyms: &'static [(&'static str, &'static str)],
        allowed: [&'static str; 2],
    ) -> Self {
        Self {
            column: column.into(),
            synonyms,
            allowed,
        }
    }

    /// Map a value through the synonym table, or return it trimmed.
    fn canonicalize<'a>(&self, value: &'a str) -> &'a str {
        let trimmed = value.trim();
        let lower = trimmed.to_lowercase();
        match self.synonyms.iter().find(|(from, _)| *from == lower) {
            Some(&(_, to)) => to,
            None => trimmed,
        }
    }
}

impl Default for BinaryCategoryRule {
    fn default() -> Self {
        Self::new("emergency_services", YES_NO_SYNONYMS, ["Yes", "No"])
    }
}

impl Rule for BinaryCategoryRule {
    fn name(&self) -> &'static str {
        "binary_category"
    }

    fn evaluate(&self, table: &DataTable) -> Vec<Verdict> {
        let col = &self.column;
        let Some(index) = table.column_index(col) else {
            return vec![missing_column(self.name(), col)];
        };

        let bad: Vec<&str> = table
            .column_values(index)
            .flatten()
            .map(|v| self.canonicalize(v))
            .filter(|v| !self.allowed.contains(v))
            .collect();

        let [yes, no] = self.allowed;
        let verdict = if bad.is_empty() {
            Verdict::pass(self.name(), format!("{col} values are {yes}/{no} or null"))
        } else {
            let top = top_values(bad.iter().copied());
            Verdict::fail(
                self.name(),
                bad.len(),
                format!("{col} invalid values: {} top={top:?}", bad.len()),
            )
            .with_top_values(top)
        };
        vec![verdict.with_column(col.as_str())]
    }
}

/// Every column ending in a suffix must hold one of a closed set of labels.
///
/// Finding no such column at all is itself a failure.
pub struct ComparisonRule {
    suffix: &'static str,
    labels: &'static [&'static str],
}

impl ComparisonRule {
    pub fn new(suffix: &'static str, labels: &'static [&'static str]) -> Self {
        Self { suffix, labels }
    }
}

impl Default for ComparisonRule {
    fn default() -> Self {
        Self::new(NATIONAL_COMPARISON_SUFFIX, &COMPARISON_LABELS)
    }
}

impl Rule for ComparisonRule {
    fn name(&self) -> &'static str {
        "national_comparison"
    }

    fn evaluate(&self, table: &DataTable) -> Vec<Verdict> {
        let suffix = self.suffix;
        let columns: Vec<usize> = (0..table.column_count())
            .filter(|&i| table.headers[i].ends_with(suffix))
            .collect();

        if columns.is_empty() {
            return vec![Verdict::fail(
                self.name(),
                1,
                format!("No *{suffix} columns found (unexpected)"),
            )];
        }

        let mut verdicts = vec![Verdict::pass(
            self.name(),
            format!("Found {} *{suffix} columns", columns.len()),
        )];

        for index in columns {
            let col = &table.headers[index];
            let bad: Vec<&str> = table
                .column_values(index)
                .flatten()
                .map(str::trim)
                .filter(|v| !self.labels.contains(v))
                .collect();

            let verdict = if bad.is_empty() {
                Verdict::pass(self.name(), format!("{col}: allowed categories only"))
            } else {
                let top = top_values(bad.iter().copied());
                Verdict::fail(
                    self.name(),
                    bad.len(),
                    format!("{col}: invalid categories={} top={top:?}", bad.len()),
                )
                .with_top_values(top)
            };
            verdicts.push(verdict.with_column(col.as_str()));
        }

        verdicts
    }
}
