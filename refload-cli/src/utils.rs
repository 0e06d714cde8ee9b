//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, path resolution, and output formatting.

use crate::error::CliError;
use clap::ValueEnum;
use refload::{Config, ConfigBuilder, LogLevel, Logger, OutputFormat, ProjectPath};
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Suppress resolver diagnostics and install hints.
    pub quiet: bool,

    /// Override the user configuration directory.
    pub config_dir: Option<PathBuf>,

    /// Level chosen by `init_logger` at startup.
    pub log_level: LogLevel,
}

impl GlobalOptions {
    /// A log sink at the level chosen at startup.
    pub fn logger(&self) -> Logger {
        Logger::new(self.log_level)
    }
}

/// Output format selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One entry per line.
    Text,
    /// A JSON document.
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

/// The format to print in: the flag if given, else the configured one.
pub fn output_format(flag: Option<FormatArg>, config: &Config) -> OutputFormat {
    flag.map_or_else(|| config.output_format(), OutputFormat::from)
}

/// Parse a `NAME=VALUE` property assignment.
///
/// Used as a clap value parser, so errors are plain strings.
pub fn parse_property(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("property name is empty in '{s}'"));
    }
    Ok((name.to_string(), value.to_string()))
}

/// Programmatic overrides carrying the `--property` assignments.
pub fn property_overrides(properties: &[(String, String)]) -> Config {
    if properties.is_empty() {
        return Config::default();
    }
    Config {
        properties: Some(properties.iter().cloned().collect::<BTreeMap<_, _>>()),
        ..Default::default()
    }
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Command-line overrides (highest priority)
/// 2. Environment variables
/// 3. `refload.local.yaml` / `refload.yaml` found from the current directory
/// 4. `config.yaml` in the user configuration directory
/// 5. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions, overrides: Config) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new().with_config(overrides);
    if let Some(dir) = &global.config_dir {
        builder = builder.with_data_dir(dir);
    }
    builder.build().map_err(CliError::from)
}

/// Resolve a project or solution argument against the current directory.
///
/// Separators are unified and `.`/`..` removed; symlinks are followed only
/// when the configuration asks for it.
pub fn resolve_project_path(path: &Path, config: &Config) -> Result<ProjectPath, CliError> {
    let cwd = env::current_dir()?;
    let text = path.to_string_lossy();
    config
        .path_canonicalizer()
        .canonicalize(&cwd, &text, &text)
        .map_err(CliError::from)
}

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    println!("{json}");
    Ok(())
}
