//! Configuration validation.
//!
//! Checks that names and extensions are usable before any project file is
//! read, so a bad configuration fails up front instead of silently matching
//! nothing.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Validates configuration values.
///
/// # Examples
///
/// ```
/// use refload::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
///
/// let bad = Config { shared_items_extension: Some(".projitems".into()), ..Default::default() };
/// assert!(ConfigValidator::validate(&bad).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error found.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref element) = config.reference_element {
            Self::validate_xml_name("reference_element", element)?;
        }

        if let Some(ref attribute) = config.include_attribute {
            Self::validate_xml_name("include_attribute", attribute)?;
        }

        if let Some(ref ext) = config.shared_items_extension {
            Self::validate_extension("shared_items_extension", ext)?;
        }

        if let Some(ref ext) = config.shared_project_extension {
            Self::validate_extension("shared_project_extension", ext)?;
        }

        if config
            .shared_items_extension()
            .eq_ignore_ascii_case(config.shared_project_extension())
        {
            return Err(Error::Validation {
                field: "shared_project_extension".into(),
                message: "Must differ from shared_items_extension".into(),
            });
        }

        if let Some(ref properties) = config.properties {
            Self::validate_properties(properties)?;
        }

        Ok(())
    }

    /// Validate an element or attribute local name.
    fn validate_xml_name(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '/' | '=' | ':' | '"' | '\''))
        {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Not a valid XML local name: '{value}'"),
            });
        }

        if value.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '.') {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("XML names cannot start with '{}'", &value[..1]),
            });
        }

        Ok(())
    }

    /// Validate a file extension given without the leading dot.
    fn validate_extension(field: &str, value: &str) -> Result<()> {
        if value.is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty".into(),
            });
        }

        if value.contains(['.', '/', '\\']) {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Give the extension without dots or separators: '{value}'"),
            });
        }

        Ok(())
    }

    /// Validate global property names.
    ///
    /// A name containing `$`, `(` or `)` could never be referenced by a
    /// `$(Name)` token.
    fn validate_properties(properties: &BTreeMap<String, String>) -> Result<()> {
        for name in properties.keys() {
            if name.trim().is_empty() {
                return Err(Error::Validation {
                    field: "properties".into(),
                    message: "Property names cannot be empty".into(),
                });
            }

            if name.contains(['$', '(', ')']) {
                return Err(Error::Validation {
                    field: format!("properties.{name}"),
                    message: "Property names cannot contain '$', '(' or ')'".into(),
                });
            }
        }

        Ok(())
    }
}
