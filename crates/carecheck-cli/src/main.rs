//! carecheck CLI - hospital extract cleaning and validation.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};
use commands::Status;

fn main() {
    let cli = Cli::parse();
    logging::init_logging(&logging::LogConfig::from_verbosity(cli.verbose));

    let result = match cli.command {
        Commands::Profile => commands::profile::run(&cli.root),
        Commands::Clean => commands::clean::run(&cli.root),
        Commands::Validate { json } => commands::validate::run(&cli.root, json),
        Commands::Changes => commands::changes::run(&cli.root),
        Commands::Run => commands::run::run(&cli.root),
    };

    match result {
        Ok(Status::Success) => {}
        Ok(Status::Failed) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
