//! Error types for the refload library.
//!
//! Every failure in the resolver is scoped to the project or reference edge it
//! concerns. The traversal and the solution loader catch these errors at that
//! scope, report them through a [`LogSink`](crate::host::LogSink) and keep
//! going with the rest of the graph.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a refload error.
///
/// # Examples
///
/// ```
/// use refload::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(3)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the refload library.
#[derive(Debug, Error)]
pub enum Error {
    /// A project file could not be read or its markup is malformed.
    #[error("cannot read project references from {}: {reason}", path.display())]
    ProjectUnreadable {
        /// The project file that failed.
        path: PathBuf,
        /// What went wrong while reading it.
        reason: String,
    },

    /// A property lookup failed because the underlying storage is unavailable.
    #[error("property lookup failed for '{name}': {reason}")]
    PropertyLookupFailed {
        /// The property that was requested.
        name: String,
        /// Why the lookup could not be answered.
        reason: String,
    },

    /// The host refused to add a project to the solution.
    #[error("failed to add project {} to the solution: {reason}", path.display())]
    AddProjectFailed {
        /// The project that could not be added.
        path: PathBuf,
        /// The reason reported by the host.
        reason: String,
    },

    /// A project was looked up by unique name but is not in the solution.
    #[error("unknown project - {unique_name}")]
    UnknownProject {
        /// The unique name that was looked up.
        unique_name: String,
    },

    /// An invalid filesystem path was provided or produced.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A solution file could not be parsed.
    #[error("invalid solution file {}: {reason}", path.display())]
    InvalidSolution {
        /// The solution file.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if the error is a failure to read a project's declarations.
    ///
    /// # Examples
    ///
    /// ```
    /// use refload::Error;
    /// use std::path::PathBuf;
    ///
    /// let err = Error::ProjectUnreadable {
    ///     path: PathBuf::from("/src/App/App.csproj"),
    ///     reason: "file not found".to_string(),
    /// };
    /// assert!(err.is_project_unreadable());
    /// ```
    #[must_use]
    pub fn is_project_unreadable(&self) -> bool {
        matches!(self, Self::ProjectUnreadable { .. })
    }

    /// Check if the error reports a project the host does not know.
    #[must_use]
    pub fn is_unknown_project(&self) -> bool {
        matches!(self, Self::UnknownProject { .. })
    }
}
