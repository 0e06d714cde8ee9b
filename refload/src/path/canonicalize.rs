//! Turning reference strings into canonical project paths.
//!
//! A reference declaration, once its macros are resolved, is either an
//! absolute path or a path relative to the directory of the project that
//! declares it. [`PathCanonicalizer`] produces the [`ProjectPath`] the
//! traversal deduplicates on. By default this is purely lexical; symlink
//! resolution through the filesystem can be switched on.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::normalize;
use crate::path::types::ProjectPath;

/// Produces canonical project paths from (possibly relative) references.
///
/// # Examples
///
/// ```
/// # #[cfg(unix)] {
/// use refload::path::PathCanonicalizer;
/// use std::path::Path;
///
/// let canonicalizer = PathCanonicalizer::new();
/// let path = canonicalizer
///     .canonicalize(Path::new("/src/App"), r"..\Lib\Lib.csproj", r"..\Lib\Lib.csproj")
///     .unwrap();
/// assert_eq!(path.as_path(), Path::new("/src/Lib/Lib.csproj"));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathCanonicalizer {
    follow_symlinks: bool,
}

impl PathCanonicalizer {
    /// Create a canonicalizer that does not touch the filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure whether existing paths are resolved through symlinks.
    #[must_use]
    pub fn with_symlink_resolution(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Whether symlinks are followed.
    #[must_use]
    pub fn follows_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// Canonicalize a reference declared by a project in `owning_dir`.
    ///
    /// `reference` is the declaration as written and is used for error
    /// reporting only; `resolved_reference` is the same text after macro
    /// substitution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the reference is empty, escapes the
    /// root, or symlink resolution fails for a reason other than the file not
    /// existing.
    pub fn canonicalize(
        &self,
        owning_dir: &Path,
        reference: &str,
        resolved_reference: &str,
    ) -> Result<ProjectPath> {
        if resolved_reference.trim().is_empty() {
            return Err(Error::InvalidPath {
                path: PathBuf::from(reference),
                reason: "Reference resolves to an empty path".to_string(),
            });
        }

        let candidate = normalize::unify_separators(resolved_reference);
        let joined = normalize::absolutize(owning_dir, &candidate).map_err(|e| match e {
            Error::InvalidPath { reason, .. } => Error::InvalidPath {
                path: PathBuf::from(reference),
                reason,
            },
            other => other,
        })?;

        if self.follow_symlinks {
            return resolve_symlinks(&joined);
        }

        Ok(ProjectPath::from_normalized(joined))
    }

    /// The form of an already absolute project path that references to the
    /// same file canonicalize to.
    ///
    /// Without symlink resolution this is the path itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if symlink resolution fails for a
    /// reason other than the file not existing.
    pub fn canonicalize_project(&self, project: &ProjectPath) -> Result<ProjectPath> {
        if self.follow_symlinks {
            return resolve_symlinks(project.as_path());
        }
        Ok(project.clone())
    }
}

fn resolve_symlinks(path: &Path) -> Result<ProjectPath> {
    let (existing, remainder) = canonicalize_existing(path)?;
    let real = match remainder {
        Some(rest) => existing.join(rest),
        None => existing,
    };
    Ok(ProjectPath::from_normalized(real))
}

/// Canonicalize the existing portion of a path.
///
/// For non-existent paths, the longest existing ancestor is canonicalized and
/// the non-existent components are returned separately.
///
/// # Errors
///
/// Returns an error if no existing ancestor can be found or the filesystem
/// refuses access.
pub fn canonicalize_existing(path: &Path) -> Result<(PathBuf, Option<PathBuf>)> {
    let mut current = path.to_path_buf();
    let mut non_existent = Vec::new();

    loop {
        match fs::canonicalize(&current) {
            Ok(canonical) => {
                let remainder = if non_existent.is_empty() {
                    None
                } else {
                    non_existent.reverse();
                    Some(non_existent.into_iter().collect())
                };
                return Ok((canonical, remainder));
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                return Err(Error::InvalidPath {
                    path: current,
                    reason: format!("Cannot resolve symlinks: {e}"),
                })
            }
        }

        match current.file_name() {
            Some(name) => {
                non_existent.push(name.to_os_string());
                current.pop();
            }
            None => {
                return Err(Error::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "Cannot find any existing portion of path".to_string(),
                });
            }
        }
    }
}
