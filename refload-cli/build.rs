//! Build script for refload-cli.
//!
//! This script generates man pages at build time using clap_mangen.
//! The generated man page is placed in OUT_DIR for inclusion in release builds.
//!
//! Note: We build a minimal command structure here rather than importing from
//! the main crate, since build scripts cannot depend on the crate being built.

use clap::{Arg, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Build the CLI command structure for man page generation.
///
/// IMPORTANT: Keep this structure synchronized with src/cli.rs
/// When adding/removing/modifying commands, update both files.
fn build_cli() -> Command {
    Command::new("refload")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Find and load the projects a solution transitively references")
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Show every resolver diagnostic, including reference edges")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .help("Suppress resolver diagnostics, failures included")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config-dir")
                .long("config-dir")
                .help("Read the user configuration from this directory instead of ~/.refload")
                .value_name("PATH")
                .global(true)
                .env("REFLOAD_CONFIG_DIR"),
        )
        .subcommands(vec![
            Command::new("resolve")
                .about("List the projects transitively referenced by the given projects")
                .long_about(
                    "Follow project references from the given project files and print every \
                     project reached, in discovery order",
                ),
            Command::new("solution")
                .about("Load every missing referenced project into a solution")
                .long_about(
                    "Open a solution file, add the referenced projects it lacks together with \
                     their shared projects, and report what was added",
                ),
            Command::new("expand")
                .about("Expand the build macros in a string")
                .long_about("Substitute $(Name) macros using global and project properties"),
            Command::new("validate")
                .about("Validate a configuration file")
                .long_about("Check a refload configuration file for errors"),
            Command::new("completions")
                .about("Generate shell completion scripts")
                .long_about("Generate shell completion scripts for bash, zsh, fish, or PowerShell"),
        ])
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("refload.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
    println!("cargo:rerun-if-changed=src/commands/");
}
