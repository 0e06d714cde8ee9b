//! CLI structure and command definitions.
//!
//! This module defines the main CLI structure using clap's derive macros,
//! including global options and subcommands.

use crate::commands::{
    CompletionsCommand, ExpandCommand, ResolveCommand, SolutionCommand, ValidateCommand,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line tool for finding and loading transitively referenced projects.
#[derive(Parser)]
#[command(name = "refload")]
#[command(
    version,
    about = "Find and load the projects a solution transitively references",
    long_about = None
)]
pub struct Cli {
    /// Show every resolver diagnostic, including reference edges
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Suppress resolver diagnostics, failures included
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Read the user configuration from this directory instead of ~/.refload
    #[arg(long, value_name = "PATH", global = true, env = "REFLOAD_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Command {
    /// List the projects transitively referenced by the given projects
    Resolve(ResolveCommand),

    /// Load every missing referenced project into a solution
    Solution(SolutionCommand),

    /// Expand the build macros in a string
    Expand(ExpandCommand),

    /// Validate a configuration file
    Validate(ValidateCommand),

    /// Generate shell completion scripts
    Completions(CompletionsCommand),
}
