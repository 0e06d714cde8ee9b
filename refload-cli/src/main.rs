//! Main entry point for the refload CLI.
//!
//! This is the command-line interface for finding the projects a solution
//! transitively references. It provides:
//! - `resolve`: List the references reachable from a set of projects
//! - `solution`: Report the projects opening a solution would add
//! - `expand`: Expand `$(Name)` macros in a string
//! - `validate`: Check a configuration file

mod cli;
mod commands;
mod error;
mod utils;

use clap::Parser;
use cli::Cli;
use utils::GlobalOptions;

fn main() {
    let cli = Cli::parse();

    let logger = refload::init_logger(cli.verbose, cli.quiet);

    let global = GlobalOptions {
        quiet: cli.quiet,
        config_dir: cli.config_dir,
        log_level: logger.level(),
    };

    let result = match cli.command {
        cli::Command::Resolve(cmd) => cmd.execute(&global),
        cli::Command::Solution(cmd) => cmd.execute(&global),
        cli::Command::Expand(cmd) => cmd.execute(&global),
        cli::Command::Validate(cmd) => cmd.execute(&global),
        cli::Command::Completions(cmd) => cmd.execute(&global),
    };

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
