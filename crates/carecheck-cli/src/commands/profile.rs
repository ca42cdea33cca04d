//! Profile command - summarize the raw extract.

use std::path::Path;

use super::{CommandResult, Status, pipeline, saved};

pub fn run(root: &Path) -> CommandResult {
    let pipeline = pipeline(root);
    let (_, text) = pipeline.profile()?;

    println!("{}", text);
    saved(&pipeline.config().profile_report_path);
    Ok(Status::Success)
}
