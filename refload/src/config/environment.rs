//! Environment variable handling for configuration overrides.
//!
//! `REFLOAD_*` variables override values from configuration files.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::env;

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use refload::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// `REFLOAD_PROPERTIES` is merged into the existing properties key by key;
    /// the other variables replace their field outright.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable value is invalid
    /// (e.g., an invalid boolean or a property without `=`).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var("REFLOAD_FOLLOW_SYMLINKS") {
            config.follow_symlinks = Some(Self::parse_bool("REFLOAD_FOLLOW_SYMLINKS", &val)?);
        }

        if let Ok(val) = env::var("REFLOAD_ENVIRONMENT_FALLBACK") {
            config.environment_fallback =
                Some(Self::parse_bool("REFLOAD_ENVIRONMENT_FALLBACK", &val)?);
        }

        if let Ok(val) = env::var("REFLOAD_OUTPUT_FORMAT") {
            let format: OutputFormat = val.parse().map_err(|message| Error::Validation {
                field: "REFLOAD_OUTPUT_FORMAT".into(),
                message,
            })?;
            config.output_format = Some(format);
        }

        if let Ok(val) = env::var("REFLOAD_PROPERTIES") {
            let overrides = Self::parse_properties("REFLOAD_PROPERTIES", &val)?;
            config
                .properties
                .get_or_insert_with(BTreeMap::new)
                .extend(overrides);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    pub(crate) fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Parse `NAME=value` pairs separated by semicolons.
    ///
    /// Empty entries are ignored. The value may itself contain `=`.
    pub(crate) fn parse_properties(field: &str, s: &str) -> Result<BTreeMap<String, String>> {
        let mut properties = BTreeMap::new();

        for entry in s.split(';').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, value) = entry.split_once('=').ok_or_else(|| Error::Validation {
                field: field.into(),
                message: format!("Expected NAME=value, got '{entry}'"),
            })?;
            properties.insert(name.trim().to_string(), value.to_string());
        }

        Ok(properties)
    }
}
