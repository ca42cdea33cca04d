//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// carecheck: clean and validate hospital facility extracts
#[derive(Parser)]
#[command(name = "carecheck")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root holding data/ and reports/
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile the raw extract
    Profile,

    /// Normalize the raw extract into the canonical table
    Clean,

    /// Validate the canonical table (honours CLEAN_PATH)
    Validate {
        /// Print the report as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compare raw and canonical column sets
    Changes,

    /// Run profile, clean, validate and changes in order
    Run,
}
