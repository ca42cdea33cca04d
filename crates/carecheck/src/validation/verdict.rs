//! Verdicts and the report that collects them.

use indexmap::IndexMap;
use serde::Serialize;

/// Offending values attached to a failing verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum Offenders {
    /// Nothing to show (passing verdicts, count-only failures).
    None,
    /// The first offending values, in row order.
    Examples(Vec<String>),
    /// The most frequent offending values with their counts.
    TopValues(IndexMap<String, usize>),
}

/// Outcome of one check of one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Rule that produced this verdict.
    pub rule: &'static str,
    /// Column inspected, when the check is about a single column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Whether the check passed.
    pub passed: bool,
    /// Number of offending rows (or 1 for structural failures).
    pub offending: usize,
    /// Bounded sample of offenders.
    pub offenders: Offenders,
    /// Human-readable message.
    pub message: String,
}

impl Verdict {
    /// A passing verdict.
    pub fn pass(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            column: None,
            passed: true,
            offending: 0,
            offenders: Offenders::None,
            message: message.into(),
        }
    }

    /// A failing verdict with `offending` offenders.
    pub fn fail(rule: &'static str, offending: usize, message: impl Into<String>) -> Self {
        Self {
            rule,
            column: None,
            passed: false,
            offending,
            offenders: Offenders::None,
            message: message.into(),
        }
    }

    /// Set the column.
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Attach example offenders.
    pub fn with_examples(mut self, examples: Vec<String>) -> Self {
        self.offenders = Offenders::Examples(examples);
        self
    }

    /// Attach top offending values.
    pub fn with_top_values(mut self, counts: IndexMap<String, usize>) -> Self {
        self.offenders = Offenders::TopValues(counts);
        self
    }

    /// `OK` or `FAIL`.
    pub fn status(&self) -> &'static str {
        if self.passed { "OK" } else { "FAIL" }
    }
}

/// Every verdict from one validation run plus the aggregate failure count.
///
/// Built once by the engine and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    rows: usize,
    columns: usize,
    verdicts: Vec<Verdict>,
    failures: usize,
}

impl Report {
    /// Build a report for a table of the given shape.
    pub fn new(shape: (usize, usize), verdicts: Vec<Verdict>) -> Self {
        let failures = verdicts.iter().filter(|v| !v.passed).count();
        Self {
            rows: shape.0,
            columns: shape.1,
            verdicts,
            failures,
        }
    }

    /// Shape of the validated table.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Verdicts in registry order.
    pub fn verdicts(&self) -> &[Verdict] {
        &self.verdicts
    }

    /// Number of failing verdicts.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// True when no verdict failed.
    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    /// Failing verdicts only.
    pub fn failed(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter().filter(|v| !v.passed)
    }

    /// Verdicts for one column.
    pub fn for_column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a Verdict> + 'a {
        self.verdicts
            .iter()
            .filter(move |v| v.column.as_deref() == Some(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_builder() {
        let verdict = Verdict::fail("format", 2, "zip_code format invalid")
            .with_column("zip_code")
            .with_examples(vec!["123".into(), "".into()]);

        assert!(!verdict.passed);
        assert_eq!(verdict.status(), "FAIL");
        assert_eq!(verdict.column.as_deref(), Some("zip_code"));
        assert_eq!(
            verdict.offenders,
            Offenders::Examples(vec!["123".into(), "".into()])
        );
    }

    #[test]
    fn test_report_counts_failures() {
        let report = Report::new(
            (10, 20),
            vec![
                Verdict::pass("format", "ok").with_column("state"),
                Verdict::fail("format", 3, "bad").with_column("zip_code"),
                Verdict::fail("national_comparison", 1, "none found"),
            ],
        );

        assert_eq!(report.failures(), 2);
        assert!(!report.passed());
        assert_eq!(report.shape(), (10, 20));
        assert_eq!(report.failed().count(), 2);
        assert_eq!(report.for_column("zip_code").count(), 1);
    }

    #[test]
    fn test_serialize_offenders() {
        let mut counts = IndexMap::new();
        counts.insert("Maybe".to_string(), 2);
        let verdict = Verdict::fail("binary_category", 2, "bad").with_top_values(counts);
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["offenders"]["kind"], "top_values");
        assert_eq!(json["offenders"]["values"]["Maybe"], 2);
        assert!(json.get("column").is_none());
    }
}
