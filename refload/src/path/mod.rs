//! Path handling for project identities.
//!
//! Every project the resolver sees is identified by a [`ProjectPath`]: an
//! absolute path with `.` and `..` resolved and separators unified. Two
//! references that spell the same file differently produce equal
//! `ProjectPath`s, which is what makes deduplication during traversal work.
//!
//! # Examples
//!
//! ```
//! # #[cfg(unix)] {
//! use refload::path::{PathCanonicalizer, ProjectPath};
//! use std::path::Path;
//!
//! let canonicalizer = PathCanonicalizer::new();
//! let lib = canonicalizer
//!     .canonicalize(Path::new("/src/App"), r"..\Lib\Lib.csproj", r"..\Lib\Lib.csproj")
//!     .unwrap();
//! assert_eq!(lib, ProjectPath::new("/src/Lib/Lib.csproj").unwrap());
//! # }
//! ```

pub mod canonicalize;
pub mod normalize;
mod types;

#[cfg(all(test, unix, feature = "property-tests"))]
mod proptests;

pub use canonicalize::PathCanonicalizer;
pub use types::ProjectPath;
