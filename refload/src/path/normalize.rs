//! Lexical path normalization.
//!
//! Reference declarations are written by build tooling that assumes Windows
//! separators, so a reference string is first brought to the host's separator
//! convention, then joined onto a base directory and stripped of `.` and `..`
//! components. None of this touches the filesystem.

use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Convert a reference string to a path using the host's separators.
///
/// On Windows both `\` and `/` are already separators. Elsewhere `\` is an
/// ordinary filename character, so it is rewritten to `/`.
///
/// # Examples
///
/// ```
/// use refload::path::normalize::unify_separators;
/// use std::path::Path;
///
/// let path = unify_separators(r"..\Lib\Lib.csproj");
/// assert_eq!(path.components().count(), 3);
/// ```
#[must_use]
pub fn unify_separators(reference: &str) -> PathBuf {
    if cfg!(windows) {
        PathBuf::from(reference)
    } else {
        PathBuf::from(reference.replace('\\', "/"))
    }
}

/// Drop `.` components and fold each `..` into the component before it.
///
/// The prefix and root are kept as they are; a `..` with nothing left to
/// remove is rejected rather than clamped at the root.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if a `..` would climb above the root.
///
/// # Examples
///
/// ```
/// use refload::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// let resolved = resolve_components(Path::new("/src/./App/../Lib")).unwrap();
/// assert_eq!(resolved, PathBuf::from("/src/Lib"));
///
/// assert!(resolve_components(Path::new("/src/../..")).is_err());
/// ```
pub fn resolve_components(path: &Path) -> Result<PathBuf> {
    let mut anchor = PathBuf::new();
    let mut names: Vec<&OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => anchor.push(component),
            Component::CurDir => {}
            Component::Normal(name) => names.push(name),
            Component::ParentDir => {
                if names.pop().is_none() {
                    return Err(Error::InvalidPath {
                        path: path.to_path_buf(),
                        reason: "'..' climbs above the root".to_string(),
                    });
                }
            }
        }
    }

    anchor.extend(names);
    Ok(anchor)
}

/// Join `reference` onto `base` unless it is already absolute, then resolve
/// `.` and `..` components.
///
/// # Errors
///
/// Returns an error if the joined path is still relative (because `base` was
/// relative) or escapes the root.
///
/// # Examples
///
/// ```
/// # #[cfg(unix)] {
/// use refload::path::normalize::absolutize;
/// use std::path::{Path, PathBuf};
///
/// let joined = absolutize(Path::new("/src/App"), Path::new("../Lib/Lib.csproj")).unwrap();
/// assert_eq!(joined, PathBuf::from("/src/Lib/Lib.csproj"));
///
/// let absolute = absolutize(Path::new("/src/App"), Path::new("/opt/Lib.csproj")).unwrap();
/// assert_eq!(absolute, PathBuf::from("/opt/Lib.csproj"));
/// # }
/// ```
pub fn absolutize(base: &Path, reference: &Path) -> Result<PathBuf> {
    let joined = if reference.is_absolute() {
        reference.to_path_buf()
    } else {
        base.join(reference)
    };

    if !joined.is_absolute() {
        return Err(Error::InvalidPath {
            path: joined,
            reason: "base directory is relative".to_string(),
        });
    }

    resolve_components(&joined)
}
