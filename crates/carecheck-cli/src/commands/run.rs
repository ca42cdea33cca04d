//! Run command - every step in order, stopping at the first failure.

use std::path::Path;

use colored::Colorize;
use tracing::warn;

use super::{CommandResult, Status};

type Step = (&'static str, fn(&Path) -> CommandResult);

const STEPS: [Step; 4] = [
    ("profile", super::profile::run),
    ("clean", super::clean::run),
    ("validate", validate_text),
    ("changes", super::changes::run),
];

fn validate_text(root: &Path) -> CommandResult {
    super::validate::run(root, false)
}

pub fn run(root: &Path) -> CommandResult {
    for (name, step) in STEPS {
        println!();
        println!("{} {}", ">>> Running:".cyan().bold(), name);

        if step(root)? == Status::Failed {
            warn!(step = name, "step failed; stopping");
            println!();
            println!("{} step '{}' failed", "Pipeline stopped:".red().bold(), name);
            return Ok(Status::Failed);
        }
    }

    println!();
    println!("{}", "Pipeline complete.".green().bold());
    Ok(Status::Success)
}
