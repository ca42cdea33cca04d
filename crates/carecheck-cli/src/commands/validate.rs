//! Validate command - check the canonical table and report.

use std::path::Path;

use colored::Colorize;

use super::{CommandResult, Status, saved, validation_pipeline};

pub fn run(root: &Path, json: bool) -> CommandResult {
    let pipeline = validation_pipeline(root)?;
    let outcome = pipeline.validate()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.to_json()?)?);
    } else {
        for line in outcome.text.lines() {
            if line.starts_with("FAIL:") {
                println!("{}", line.red());
            } else if line.starts_with("OK:") {
                println!("{}", line.green());
            } else if line.starts_with("TOTAL FAILURES:") {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
        saved(&pipeline.config().validation_report_path);
    }

    Ok(if outcome.report.passed() {
        Status::Success
    } else {
        Status::Failed
    })
}
