//! Line-oriented rendering of a validation [`Report`].

use std::fmt::Write;
use std::path::Path;

use crate::validation::Report;

/// Render a report as `OK:`/`FAIL:` lines ending with `TOTAL FAILURES: <n>`.
///
/// Verdicts from different rules are separated by a blank line.
pub fn render_validation_report(report: &Report, source: &Path) -> String {
    let (rows, cols) = report.shape();
    let mut out = String::new();
    let _ = writeln!(out, "=== VALIDATION REPORT ===");
    let _ = writeln!(out, "File: {}", source.display());
    let _ = writeln!(out, "Rows, Cols: ({rows}, {cols})");
    let _ = writeln!(out);

    let mut previous: Option<&str> = None;
    for verdict in report.verdicts() {
        if previous.is_some_and(|rule| rule != verdict.rule) {
            let _ = writeln!(out);
        }
        previous = Some(verdict.rule);
        let _ = writeln!(out, "{}: {}", verdict.status(), verdict.message);
    }

    let _ = writeln!(out);
    let _ = write!(out, "TOTAL FAILURES: {}", report.failures());
    out
}
