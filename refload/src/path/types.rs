//! The canonical project path type.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::path::normalize;

/// An absolute, normalized path that identifies a project.
///
/// Two `ProjectPath`s are the same project iff their comparison keys are
/// equal. The key is the path text itself, except on Windows where the
/// filesystem is case-insensitive and ASCII case is folded.
///
/// # Examples
///
/// ```
/// # #[cfg(unix)] {
/// use refload::path::ProjectPath;
///
/// let a = ProjectPath::new("/src/App/../Lib/Lib.csproj").unwrap();
/// let b = ProjectPath::new("/src/Lib/./Lib.csproj").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.to_string(), "/src/Lib/Lib.csproj");
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProjectPath {
    path: PathBuf,
    key: String,
}

impl ProjectPath {
    /// Create a project path from an absolute path, resolving `.` and `..`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is relative or escapes the root.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resolved = normalize::absolutize(Path::new(""), path)?;
        Ok(Self::from_normalized(resolved))
    }

    /// Wrap a path that is already absolute and free of `.`/`..` components.
    pub(crate) fn from_normalized(path: PathBuf) -> Self {
        let key = comparison_key(&path);
        Self { path, key }
    }

    /// The underlying path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// The directory containing the project file.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(&self.path)
    }

    /// The project file name without its extension.
    #[must_use]
    pub fn file_stem(&self) -> Option<&str> {
        self.path.file_stem().and_then(|s| s.to_str())
    }

    /// The project file's extension.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.path.extension().and_then(|s| s.to_str())
    }

    /// The same path with its extension replaced.
    #[must_use]
    pub fn with_extension(&self, extension: &str) -> Self {
        Self::from_normalized(self.path.with_extension(extension))
    }

    /// The key used for equality and hashing.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Consume the project path and return the underlying path.
    #[must_use]
    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

fn comparison_key(path: &Path) -> String {
    let text = path.to_string_lossy();
    if cfg!(windows) {
        text.to_ascii_lowercase()
    } else {
        text.into_owned()
    }
}

impl PartialEq for ProjectPath {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ProjectPath {}

impl Hash for ProjectPath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl AsRef<Path> for ProjectPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for ProjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

impl Serialize for ProjectPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path.to_string_lossy())
    }
}
