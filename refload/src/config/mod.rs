//! Settings that shape reference discovery.
//!
//! A [`Config`] names the reference element and attribute to read, the
//! shared-project extensions, global properties for macro expansion, and a
//! few switches. [`ConfigBuilder`] layers it from YAML files, `REFLOAD_*`
//! environment variables and caller overrides, then validates the result.
//!
//! # Layering
//!
//! Strongest first:
//!
//! 1. Caller overrides (`ConfigBuilder::with_config`)
//! 2. Environment variables (`REFLOAD_*`)
//! 3. Private project config (`refload.local.yaml`)
//! 4. Project config (`refload.yaml`)
//! 5. User config (`~/.refload/config.yaml`)
//! 6. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use refload::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/solution"))
//!     .build()
//!     .unwrap();
//! println!("reference element: {}", config.reference_element());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{default_data_dir, ConfigLoader, ConfigScope, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat};
pub use validator::ConfigValidator;
