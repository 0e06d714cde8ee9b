//! Command to validate a refload configuration file.

use crate::error::CliError;
use crate::utils::{load_configuration, GlobalOptions};
use clap::Args;
use refload::config::{Config, ConfigLoader, ConfigValidator};
use std::path::PathBuf;

/// Validate a refload configuration file.
#[derive(Args)]
pub struct ValidateCommand {
    /// Configuration file to validate; defaults to the merged discovered configuration
    #[arg(value_name = "CONFIG_PATH")]
    pub config_path: Option<PathBuf>,
}

impl ValidateCommand {
    /// Execute the validate command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let Some(path) = self.config_path else {
            return match load_configuration(global, Config::default()) {
                Ok(_) => {
                    println!("Configuration is valid");
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Validation error: {e}");
                    Err(CliError::SemanticFailure(
                        "Configuration validation failed".to_string(),
                    ))
                }
            };
        };

        if !path.exists() {
            return Err(CliError::InvalidArguments(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let config = match ConfigLoader::load_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Parse error: {e}");
                return Err(CliError::SemanticFailure(
                    "Configuration file is invalid".to_string(),
                ));
            }
        };

        match ConfigValidator::validate(&config) {
            Ok(()) => {
                println!("Configuration is valid");
                Ok(())
            }
            Err(e) => {
                eprintln!("Validation error: {e}");
                Err(CliError::SemanticFailure(
                    "Configuration validation failed".to_string(),
                ))
            }
        }
    }
}
