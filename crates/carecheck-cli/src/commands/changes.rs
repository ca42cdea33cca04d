//! Changes command - compare raw and canonical column sets.

use std::path::Path;

use super::{CommandResult, Status, pipeline, saved};

pub fn run(root: &Path) -> CommandResult {
    let pipeline = pipeline(root);
    let (_, text) = pipeline.report_changes()?;

    println!("{}", text);
    saved(&pipeline.config().change_report_path);
    Ok(Status::Success)
}
