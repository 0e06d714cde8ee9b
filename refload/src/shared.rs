//! Shared-project imports.
//!
//! A shared project contributes its items to the projects that import it, so
//! it never shows up as an ordinary reference. Instead the importing project
//! exposes a pipe-delimited list of shared-items import files (`.projitems`).
//! When the shared project is not loaded, the host cannot tell which
//! `.shproj` owns an import file, and the owner is derived by swapping the
//! extension. This is a best-effort heuristic: the two files are assumed to
//! differ only in extension, and a derived path that does not exist surfaces
//! later when the host tries to load it.

use std::path::Path;

use crate::error::{Error, Result};
use crate::host::{LogSink, ProjectHierarchy, SolutionHost};
use crate::path::{normalize, ProjectPath};

/// Extension of shared-items import files.
pub const SHARED_ITEMS_EXTENSION: &str = "projitems";

/// Extension of shared project files.
pub const SHARED_PROJECT_EXTENSION: &str = "shproj";

const IMPORT_SEPARATOR: char = '|';

/// Maps shared-items imports to the shared projects that own them.
///
/// # Examples
///
/// ```
/// # #[cfg(unix)] {
/// use refload::path::ProjectPath;
/// use refload::shared::SharedImportResolver;
///
/// let resolver = SharedImportResolver::new();
/// let import = ProjectPath::new("/src/Shared/Shared.projitems").unwrap();
/// assert_eq!(
///     resolver.shared_project_for_import(&import).to_string(),
///     "/src/Shared/Shared.shproj"
/// );
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SharedImportResolver {
    items_extension: String,
    project_extension: String,
}

impl Default for SharedImportResolver {
    fn default() -> Self {
        Self {
            items_extension: SHARED_ITEMS_EXTENSION.to_string(),
            project_extension: SHARED_PROJECT_EXTENSION.to_string(),
        }
    }
}

impl SharedImportResolver {
    /// Create a resolver for `.projitems` imports owned by `.shproj` projects.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use different extensions (without the leading dot).
    #[must_use]
    pub fn with_extensions(
        mut self,
        items_extension: impl Into<String>,
        project_extension: impl Into<String>,
    ) -> Self {
        self.items_extension = items_extension.into();
        self.project_extension = project_extension.into();
        self
    }

    /// Collect the shared projects imported by `project` that are not loaded.
    ///
    /// Imports the project cannot map to an item are skipped, as are imports
    /// whose item already has a loaded shared-project hierarchy. Every other
    /// import is logged as `unique_name -> import` and mapped to its shared
    /// project path.
    #[must_use]
    pub fn collect_unloaded_shared_projects(
        &self,
        project: &dyn ProjectHierarchy,
        project_unique_name: &str,
        log: &dyn LogSink,
    ) -> Vec<ProjectPath> {
        let Some(imports) = project.shared_items_imports(log) else {
            return Vec::new();
        };

        let mut shared_projects = Vec::new();

        for import in imports.split(IMPORT_SEPARATOR).filter(|s| !s.is_empty()) {
            let Some(item) = project.parse_canonical_name(import) else {
                log::debug!("{project_unique_name}: no item for shared import {import}");
                continue;
            };

            if project.has_shared_project_hierarchy(item) {
                continue;
            }

            log.write(&format!("{project_unique_name} -> {import}"));

            match self.import_path(project.project_dir(), import) {
                Ok(import_path) => {
                    shared_projects.push(self.shared_project_for_import(&import_path));
                }
                Err(e) => {
                    log.failure(&format!(
                        "*** FAILED to resolve shared import. ***\t{import}: {e}"
                    ));
                }
            }
        }

        shared_projects
    }

    /// Derive the shared project path for an import file.
    ///
    /// The items extension (compared case-insensitively) is replaced by the
    /// project extension; any other path is returned unchanged.
    #[must_use]
    pub fn shared_project_for_import(&self, import: &ProjectPath) -> ProjectPath {
        match import.extension() {
            Some(ext) if ext.eq_ignore_ascii_case(&self.items_extension) => {
                import.with_extension(&self.project_extension)
            }
            _ => import.clone(),
        }
    }

    fn import_path(&self, project_dir: &Path, import: &str) -> Result<ProjectPath> {
        let import = normalize::unify_separators(import);
        let absolute = normalize::absolutize(project_dir, &import)?;
        ProjectPath::new(absolute)
    }
}

/// Look a project up by unique name and collect its unloaded shared projects.
///
/// # Errors
///
/// Returns [`Error::UnknownProject`] if the solution has no project with
/// that unique name.
pub fn shared_imports_of_unique_name(
    solution: &dyn SolutionHost,
    resolver: &SharedImportResolver,
    project_unique_name: &str,
    log: &dyn LogSink,
) -> Result<Vec<ProjectPath>> {
    let project = solution
        .project_of_unique_name(project_unique_name)
        .ok_or_else(|| Error::UnknownProject {
            unique_name: project_unique_name.to_string(),
        })?;

    Ok(resolver.collect_unloaded_shared_projects(project, project_unique_name, log))
}
