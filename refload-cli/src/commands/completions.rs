//! Shell completion generation command.
//!
//! This module provides the `completions` command which generates shell completion
//! scripts for bash, zsh, fish, and PowerShell.

use crate::cli::Cli;
use crate::error::CliError;
use crate::utils::GlobalOptions;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use std::io;

/// Name of the installed binary
const BIN_NAME: &str = "refload";

/// Generate shell completion scripts
#[derive(Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsCommand {
    /// Execute the completions command.
    pub fn execute(&self, global: &GlobalOptions) -> Result<(), CliError> {
        let mut cmd = Cli::command();

        if !global.quiet {
            print_install_hint(self.shell);
        }

        generate(self.shell, &mut cmd, BIN_NAME, &mut io::stdout());

        Ok(())
    }
}

fn print_install_hint(shell: Shell) {
    let hint = match shell {
        Shell::Bash => {
            "refload completions bash > ~/.local/share/bash-completion/completions/refload"
        }
        Shell::Zsh => "refload completions zsh > ~/.zsh/completions/_refload",
        Shell::Fish => "refload completions fish > ~/.config/fish/completions/refload.fish",
        Shell::PowerShell => "refload completions powershell | Out-String | Invoke-Expression",
        _ => return,
    };
    eprintln!("# Install with:");
    eprintln!("#   {hint}");
    eprintln!();
}
