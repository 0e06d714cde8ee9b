//! Configuration schema definitions.
//!
//! Every field is optional so that sources can be layered; the accessor
//! methods on [`Config`] supply the built-in defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::path::PathCanonicalizer;
use crate::references::{ReferenceExtractor, DEFAULT_INCLUDE_ATTRIBUTE, DEFAULT_REFERENCE_ELEMENT};
use crate::shared::{SharedImportResolver, SHARED_ITEMS_EXTENSION, SHARED_PROJECT_EXTENSION};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use refload::config::Config;
/// use std::collections::BTreeMap;
///
/// let config = Config {
///     properties: Some(BTreeMap::from([("Configuration".to_string(), "Debug".to_string())])),
///     follow_symlinks: Some(true),
///     ..Default::default()
/// };
/// assert!(config.follows_symlinks());
/// assert_eq!(config.reference_element(), "ProjectReference");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Global macro properties visible to every project.
    pub properties: Option<BTreeMap<String, String>>,

    /// Local name of the project reference element.
    pub reference_element: Option<String>,

    /// Attribute of the reference element that holds the path.
    pub include_attribute: Option<String>,

    /// Extension of shared-items import files, without the dot.
    pub shared_items_extension: Option<String>,

    /// Extension of shared project files, without the dot.
    pub shared_project_extension: Option<String>,

    /// Resolve symlinks in canonical project paths.
    pub follow_symlinks: Option<bool>,

    /// Fall back to process environment variables for undefined properties.
    pub environment_fallback: Option<bool>,

    /// Output format for command results.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// The configured reference element, or `ProjectReference`.
    #[must_use]
    pub fn reference_element(&self) -> &str {
        self.reference_element
            .as_deref()
            .unwrap_or(DEFAULT_REFERENCE_ELEMENT)
    }

    /// The configured include attribute, or `Include`.
    #[must_use]
    pub fn include_attribute(&self) -> &str {
        self.include_attribute
            .as_deref()
            .unwrap_or(DEFAULT_INCLUDE_ATTRIBUTE)
    }

    /// The configured shared-items extension, or `projitems`.
    #[must_use]
    pub fn shared_items_extension(&self) -> &str {
        self.shared_items_extension
            .as_deref()
            .unwrap_or(SHARED_ITEMS_EXTENSION)
    }

    /// The configured shared project extension, or `shproj`.
    #[must_use]
    pub fn shared_project_extension(&self) -> &str {
        self.shared_project_extension
            .as_deref()
            .unwrap_or(SHARED_PROJECT_EXTENSION)
    }

    /// Whether symlinks are resolved. Off by default.
    #[must_use]
    pub fn follows_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    /// Whether the environment is consulted for undefined properties. On by default.
    #[must_use]
    pub fn uses_environment_fallback(&self) -> bool {
        self.environment_fallback.unwrap_or(true)
    }

    /// The configured output format, or text.
    #[must_use]
    pub fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }

    /// The global properties, possibly empty.
    #[must_use]
    pub fn global_properties(&self) -> BTreeMap<String, String> {
        self.properties.clone().unwrap_or_default()
    }

    /// A reference extractor for the configured element and attribute.
    #[must_use]
    pub fn reference_extractor(&self) -> ReferenceExtractor {
        ReferenceExtractor::new()
            .with_element(self.reference_element())
            .with_include_attribute(self.include_attribute())
    }

    /// A canonicalizer honoring `follow_symlinks`.
    #[must_use]
    pub fn path_canonicalizer(&self) -> PathCanonicalizer {
        PathCanonicalizer::new().with_symlink_resolution(self.follows_symlinks())
    }

    /// A shared import resolver for the configured extensions.
    #[must_use]
    pub fn shared_import_resolver(&self) -> SharedImportResolver {
        SharedImportResolver::new()
            .with_extensions(self.shared_items_extension(), self.shared_project_extension())
    }
}

/// Output format for command results.
///
/// # Examples
///
/// ```
/// use refload::config::OutputFormat;
///
/// let format: OutputFormat = "json".parse().unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One path per line.
    #[default]
    Text,
    /// A JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format '{s}' (expected text or json)")),
        }
    }
}
