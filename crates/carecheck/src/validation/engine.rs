//! The validation engine: a fixed, ordered registry of rules.

use tracing::{debug, info, warn};

use super::rules::{BinaryCategoryRule, ComparisonRule, FormatRule, ProviderIdRule, RatingRule, Rule};
use super::verdict::Report;
use crate::input::DataTable;

/// Evaluates every registered rule against a table.
///
/// Rules never short-circuit each other: a failure is recorded and the next
/// rule still runs.
pub struct ValidationEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl ValidationEngine {
    /// Create an engine with the canonical hospital rule set.
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(ProviderIdRule::default()),
                Box::new(FormatRule::zip_code()),
                Box::new(FormatRule::phone_number()),
                Box::new(FormatRule::state()),
                Box::new(RatingRule::default()),
                Box::new(BinaryCategoryRule::default()),
                Box::new(ComparisonRule::default()),
            ],
        }
    }

    /// Create an engine with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule. Rules run in registration order.
    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Names of registered rules, in order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules and collect their verdicts into a report.
    pub fn validate(&self, table: &DataTable) -> Report {
        let mut verdicts = Vec::new();

        for rule in &self.rules {
            let produced = rule.evaluate(table);
            for verdict in &produced {
                if verdict.passed {
                    debug!(rule = rule.name(), message = %verdict.message, "check passed");
                } else {
                    warn!(
                        rule = rule.name(),
                        column = verdict.column.as_deref().unwrap_or("-"),
                        offending = verdict.offending,
                        "check failed"
                    );
                }
            }
            verdicts.extend(produced);
        }

        let report = Report::new(table.shape(), verdicts);
        info!(
            checks = report.verdicts().len(),
            failures = report.failures(),
            "validation complete"
        );
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::new()
    }
}
