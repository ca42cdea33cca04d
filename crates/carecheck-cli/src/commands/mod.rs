//! CLI command implementations.

pub mod changes;
pub mod clean;
pub mod profile;
pub mod run;
pub mod validate;

use std::path::Path;

use carecheck::{Pipeline, PipelineConfig};
use colored::Colorize;

/// Outcome a command reports to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// The command ran but its checks failed.
    Failed,
}

pub type CommandResult = Result<Status, Box<dyn std::error::Error>>;

/// Build a pipeline over the fixed layout under `root`.
pub(crate) fn pipeline(root: &Path) -> Pipeline {
    Pipeline::new(PipelineConfig::new(root))
}

/// Build a pipeline whose validation input honours `CLEAN_PATH`.
pub(crate) fn validation_pipeline(root: &Path) -> Result<Pipeline, Box<dyn std::error::Error>> {
    Ok(Pipeline::new(PipelineConfig::from_env(root)?))
}

pub(crate) fn saved(path: &Path) {
    println!();
    println!("{} {}", "Saved:".green().bold(), path.display());
}
