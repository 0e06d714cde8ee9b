#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # refload
//!
//! A library for discovering the projects a solution transitively references.
//!
//! Starting from the projects loaded in a solution, refload reads each
//! project's reference declarations, resolves the `$(Name)` build macros they
//! contain against the declaring project's properties, and walks the
//! reference graph depth-first. The projects found this way, along with the
//! shared projects their members import, can then be added to the solution.
//!
//! ## Core Types
//!
//! - [`ProjectPath`]: Canonical project path with host-appropriate equality
//! - [`ReferenceTraversal`]: Depth-first closure over project references
//! - [`SolutionLoader`] and [`LoadReport`]: Adding missing projects
//! - [`host`]: The traits any host environment implements
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use refload::macros::resolve_macros;
//! use refload::MemoryLog;
//! use std::collections::HashMap;
//!
//! let properties = HashMap::from([("Root".to_string(), "src".to_string())]);
//! let log = MemoryLog::new();
//! assert_eq!(
//!     resolve_macros(r"$(Root)\Lib\Lib.csproj", &properties, &log),
//!     r"src\Lib\Lib.csproj"
//! );
//! ```

pub mod config;
pub mod error;
pub mod fs_host;
pub mod host;
pub mod loader;
pub mod logging;
pub mod macros;
pub mod path;
pub mod references;
pub mod shared;
pub mod traversal;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use error::{Error, Result};
pub use fs_host::{FileSystemSolution, ProjectProperties, SolutionFile};
pub use host::{LogSink, ProjectHierarchy, PropertyLookup, PropertyProvider, SolutionHost};
pub use loader::{LoadReport, SolutionLoader};
pub use logging::{init_logger, LogLevel, Logger, MemoryLog};
pub use path::{PathCanonicalizer, ProjectPath};
pub use references::{ReferenceDeclaration, ReferenceExtractor};
pub use shared::SharedImportResolver;
pub use traversal::ReferenceTraversal;
