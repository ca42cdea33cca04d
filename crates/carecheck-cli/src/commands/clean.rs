//! Clean command - write the canonical table.

use std::path::Path;

use colored::Colorize;

use super::{CommandResult, Status, pipeline, saved};

pub fn run(root: &Path) -> CommandResult {
    let pipeline = pipeline(root);
    let outcome = pipeline.clean()?;
    let table = &outcome.cleaned.table;
    let summary = &outcome.cleaned.summary;

    let source = &outcome.source;
    println!(
        "{} {} ({} rows, {} bytes, {})",
        "Read".cyan().bold(),
        source.file,
        source.row_count,
        source.size_bytes,
        source.encoding
    );
    println!("  {} {}", "hash".dimmed(), source.hash.dimmed());
    for change in &summary.changes {
        if change.values_changed == 0 {
            continue;
        }
        println!(
            "  {} {} value(s) in '{}' ({} blanked)",
            change.normalizer.label().cyan(),
            change.values_changed,
            change.column.white().bold(),
            change.values_blanked
        );
    }
    if summary.dropped.total() > 0 {
        println!(
            "  {} {} footnote and {} other column(s)",
            "dropped".yellow(),
            summary.dropped.footnotes.len(),
            summary.dropped.other.len()
        );
    }

    saved(&pipeline.config().clean_path);
    let (rows, cols) = table.shape();
    println!("Rows, Cols: ({}, {})", rows, cols);
    Ok(Status::Success)
}
