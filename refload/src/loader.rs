//! Loading missing projects into a solution.
//!
//! [`SolutionLoader`] ties the pieces together for one solution-open event:
//! it collects the transitive references of every loaded project, adds the
//! ones the solution lacks, and loads the shared projects imported by both
//! the original and the newly added projects. A project that cannot be added
//! is reported and skipped; it never stops the remaining additions.

use serde::Serialize;

use crate::config::Config;
use crate::host::{LogSink, SolutionHost};
use crate::path::{PathCanonicalizer, ProjectPath};
use crate::references::ReferenceExtractor;
use crate::shared::{shared_imports_of_unique_name, SharedImportResolver};
use crate::traversal::ReferenceTraversal;

/// What a loader run did.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Referenced projects that were added, in discovery order.
    pub added: Vec<ProjectPath>,
    /// Referenced projects the host refused to add.
    pub failed: Vec<ProjectPath>,
    /// Shared projects that were added.
    pub shared_added: Vec<ProjectPath>,
    /// Shared projects the host refused to add.
    pub shared_failed: Vec<ProjectPath>,
}

impl LoadReport {
    /// Whether nothing was missing from the solution.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.failed.is_empty()
            && self.shared_added.is_empty()
            && self.shared_failed.is_empty()
    }

    /// Whether any addition failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty() || !self.shared_failed.is_empty()
    }
}

/// Adds every missing referenced project to a solution.
///
/// # Examples
///
/// ```no_run
/// use refload::fs_host::FileSystemSolution;
/// use refload::loader::SolutionLoader;
/// use refload::Logger;
/// use std::path::Path;
///
/// let mut solution = FileSystemSolution::from_solution_file(Path::new("App.sln")).unwrap();
/// let logger = Logger::default();
/// let report = SolutionLoader::new(&logger).on_solution_open(&mut solution);
/// println!("added {} project(s)", report.added.len());
/// ```
pub struct SolutionLoader<'a> {
    log: &'a dyn LogSink,
    extractor: ReferenceExtractor,
    canonicalizer: PathCanonicalizer,
    shared: SharedImportResolver,
}

impl<'a> SolutionLoader<'a> {
    /// Create a loader with default settings.
    #[must_use]
    pub fn new(log: &'a dyn LogSink) -> Self {
        Self {
            log,
            extractor: ReferenceExtractor::new(),
            canonicalizer: PathCanonicalizer::new(),
            shared: SharedImportResolver::new(),
        }
    }

    /// Take the extractor, canonicalizer and shared import resolver from `config`.
    #[must_use]
    pub fn with_config(self, config: &Config) -> Self {
        self.with_extractor(config.reference_extractor())
            .with_canonicalizer(config.path_canonicalizer())
            .with_shared_resolver(config.shared_import_resolver())
    }

    /// Use a custom reference extractor.
    #[must_use]
    pub fn with_extractor(mut self, extractor: ReferenceExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Use a custom path canonicalizer.
    #[must_use]
    pub fn with_canonicalizer(mut self, canonicalizer: PathCanonicalizer) -> Self {
        self.canonicalizer = canonicalizer;
        self
    }

    /// Use a custom shared import resolver.
    #[must_use]
    pub fn with_shared_resolver(mut self, shared: SharedImportResolver) -> Self {
        self.shared = shared;
        self
    }

    /// Bring the solution's project set up to its transitive closure.
    pub fn on_solution_open<S: SolutionHost>(&self, solution: &mut S) -> LoadReport {
        let loaded = solution.loaded_projects();
        let mut report = LoadReport::default();

        let discovered = ReferenceTraversal::new(&*solution, self.log)
            .with_extractor(self.extractor.clone())
            .with_canonicalizer(self.canonicalizer.clone())
            .collect_transitive_references(&loaded);

        log::debug!(
            "{} loaded project(s), {} missing reference(s)",
            loaded.len(),
            discovered.len()
        );

        for project in &loaded {
            self.load_shared_projects(solution, project, &mut report);
        }

        for path in discovered {
            self.log
                .write(&format!("Adding project to solution: {path}"));
            match solution.add_existing_project(&path) {
                Ok(()) => {
                    self.load_shared_projects(solution, &path, &mut report);
                    report.added.push(path);
                }
                Err(e) => {
                    self.log.failure(&format!("FAILED. {e}"));
                    report.failed.push(path);
                }
            }
        }

        report
    }

    fn load_shared_projects<S: SolutionHost>(
        &self,
        solution: &mut S,
        project: &ProjectPath,
        report: &mut LoadReport,
    ) {
        let unique_name = project.to_string();
        let shared_projects =
            match shared_imports_of_unique_name(&*solution, &self.shared, &unique_name, self.log) {
                Ok(shared_projects) => shared_projects,
                Err(e) => {
                    self.log
                        .failure(&format!("*** FAILED to read shared project imports. ***\t{e}"));
                    return;
                }
            };

        for shared_project in shared_projects {
            if solution
                .project_of_unique_name(&shared_project.to_string())
                .is_some()
            {
                continue;
            }

            self.log
                .write(&format!("Adding project to solution: {shared_project}"));
            match solution.add_existing_project(&shared_project) {
                Ok(()) => report.shared_added.push(shared_project),
                Err(e) => {
                    self.log.failure(&format!("FAILED. {e}"));
                    report.shared_failed.push(shared_project);
                }
            }
        }
    }
}
