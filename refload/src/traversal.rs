//! Transitive closure of project references.
//!
//! Starting from the projects already loaded, [`ReferenceTraversal`] follows
//! reference declarations depth-first and returns every project that is
//! reachable but not yet loaded, in the order it was discovered.
//!
//! The traversal is pre-order: a newly discovered project is expanded before
//! the next sibling declaration is looked at, so the log reads as the chain of
//! discovery (`A -> B`, `B -> C`, `A -> D`, ...). One visited set, seeded with
//! the roots, is shared by the whole run; a path is expanded at most once,
//! which is also what stops cycles.

use indexmap::IndexSet;

use crate::host::{LogSink, PropertyProvider};
use crate::macros::resolve_macros;
use crate::path::{PathCanonicalizer, ProjectPath};
use crate::references::ReferenceExtractor;

/// Computes the transitive set of referenced projects.
///
/// # Examples
///
/// ```no_run
/// use refload::host::{NoProperties, PropertyLookup, PropertyProvider};
/// use refload::path::ProjectPath;
/// use refload::traversal::ReferenceTraversal;
/// use refload::MemoryLog;
///
/// struct Plain;
///
/// impl PropertyProvider for Plain {
///     fn properties_for(&self, _project: &ProjectPath) -> Box<dyn PropertyLookup + '_> {
///         Box::new(NoProperties)
///     }
/// }
///
/// let log = MemoryLog::new();
/// let traversal = ReferenceTraversal::new(&Plain, &log);
/// let roots = vec![ProjectPath::new("/src/App/App.csproj").unwrap()];
/// for project in traversal.collect_transitive_references(&roots) {
///     println!("{project}");
/// }
/// ```
pub struct ReferenceTraversal<'a> {
    properties: &'a dyn PropertyProvider,
    log: &'a dyn LogSink,
    extractor: ReferenceExtractor,
    canonicalizer: PathCanonicalizer,
}

impl<'a> ReferenceTraversal<'a> {
    /// Create a traversal with the default extractor and canonicalizer.
    #[must_use]
    pub fn new(properties: &'a dyn PropertyProvider, log: &'a dyn LogSink) -> Self {
        Self {
            properties,
            log,
            extractor: ReferenceExtractor::new(),
            canonicalizer: PathCanonicalizer::new(),
        }
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

    /// Collect every project reachable from `roots` that is not itself a root.
    ///
    /// Roots are expanded in the order given, each in the canonical form its
    /// references would take. Failures are reported to the log and never
    /// abort the run: an unreadable project contributes no references, and a
    /// reference that cannot be canonicalized is skipped.
    #[must_use]
    pub fn collect_transitive_references(&self, roots: &[ProjectPath]) -> Vec<ProjectPath> {
        let roots: Vec<ProjectPath> =
            roots.iter().map(|root| self.canonical_root(root)).collect();
        let mut visited: IndexSet<ProjectPath> = roots.iter().cloned().collect();
        let seeded = visited.len();

        for root in &roots {
            self.expand(root, &mut visited);
        }

        visited.into_iter().skip(seeded).collect()
    }

    fn canonical_root(&self, root: &ProjectPath) -> ProjectPath {
        match self.canonicalizer.canonicalize_project(root) {
            Ok(canonical) => canonical,
            Err(e) => {
                self.log
                    .failure(&format!("*** FAILED to resolve project path. ***\t{root}: {e}"));
                root.clone()
            }
        }
    }

    fn expand(&self, project: &ProjectPath, visited: &mut IndexSet<ProjectPath>) {
        let declarations = match self.extractor.extract_references(project.as_path()) {
            Ok(declarations) => declarations,
            Err(e) => {
                self.log
                    .failure(&format!("*** FAILED to read project references. ***\t{e}"));
                return;
            }
        };

        let properties = self.properties.properties_for(project);

        for declaration in declarations {
            let resolved = resolve_macros(declaration.as_str(), &*properties, self.log);
            let referenced = match self.canonicalizer.canonicalize(
                project.directory(),
                declaration.as_str(),
                &resolved,
            ) {
                Ok(path) => path,
                Err(e) => {
                    self.log.failure(&format!(
                        "*** FAILED to resolve project reference. ***\t{project} -> {declaration}: {e}"
                    ));
                    continue;
                }
            };

            self.log.write(&format!("{project} -> {referenced}"));

            if visited.insert(referenced.clone()) {
                self.expand(&referenced, visited);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{NoProperties, PropertyLookup};
    use crate::logging::MemoryLog;
    use std::collections::HashMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct Plain;

    impl PropertyProvider for Plain {
        fn properties_for(&self, _project: &ProjectPath) -> Box<dyn PropertyLookup + '_> {
            Box::new(NoProperties)
        }
    }

    /// Gives each project its own property map, keyed by file stem.
    struct PerProject(HashMap<String, HashMap<String, String>>);

    impl PropertyProvider for PerProject {
        fn properties_for(&self, project: &ProjectPath) -> Box<dyn PropertyLookup + '_> {
            match project.file_stem().and_then(|stem| self.0.get(stem)) {
                Some(properties) => Box::new(properties.clone()),
                None => Box::new(NoProperties),
            }
        }
    }

    fn project(dir: &Path, name: &str, references: &[&str]) -> ProjectPath {
        let folder = dir.join(name);
        fs::create_dir_all(&folder).unwrap();
        let path = folder.join(format!("{name}.csproj"));
        let items: String = references
            .iter()
            .map(|r| format!("    <ProjectReference Include=\"{r}\" />\n"))
            .collect();
        fs::write(
            &path,
            format!("<Project>\n  <ItemGroup>\n{items}  </ItemGroup>\n</Project>\n"),
        )
        .unwrap();
        ProjectPath::new(&path).unwrap()
    }

    fn stems(paths: &[ProjectPath]) -> Vec<&str> {
        paths.iter().filter_map(ProjectPath::file_stem).collect()
    }

    #[test]
    fn test_cycle_terminates_and_excludes_root() {
        let temp = TempDir::new().unwrap();
        let a = project(temp.path(), "A", &[r"..\B\B.csproj"]);
        project(temp.path(), "B", &[r"..\C\C.csproj"]);
        project(temp.path(), "C", &[r"..\A\A.csproj"]);

        let log = MemoryLog::new();
        let found = ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[a]);
        assert_eq!(stems(&found), vec!["B", "C"]);
    }

    #[test]
    fn test_pre_order_depth_first() {
        let temp = TempDir::new().unwrap();
        let app = project(temp.path(), "App", &[r"..\B\B.csproj", r"..\D\D.csproj"]);
        project(temp.path(), "B", &[r"..\C\C.csproj"]);
        project(temp.path(), "C", &[]);
        project(temp.path(), "D", &[]);

        let log = MemoryLog::new();
        let found = ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[app]);
        assert_eq!(stems(&found), vec!["B", "C", "D"]);

        let edges: Vec<String> = log
            .messages()
            .into_iter()
            .filter(|m| m.contains(" -> "))
            .collect();
        assert_eq!(edges.len(), 3);
        assert!(edges[0].ends_with("B.csproj") && edges[0].contains("App.csproj"));
        assert!(edges[1].contains("B.csproj ->") && edges[1].ends_with("C.csproj"));
        assert!(edges[2].contains("App.csproj ->") && edges[2].ends_with("D.csproj"));
    }

    #[test]
    fn test_diamond_visits_shared_dependency_once() {
        let temp = TempDir::new().unwrap();
        let app = project(temp.path(), "App", &[r"..\L\L.csproj", r"..\R\R.csproj"]);
        project(temp.path(), "L", &[r"..\Core\Core.csproj"]);
        project(temp.path(), "R", &[r"..\Core\Core.csproj", "../Core/./Core.csproj"]);
        project(temp.path(), "Core", &[]);

        let log = MemoryLog::new();
        let found = ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[app]);
        assert_eq!(stems(&found), vec!["L", "Core", "R"]);
    }

    #[test]
    fn test_reference_to_another_root_not_added() {
        let temp = TempDir::new().unwrap();
        let app = project(temp.path(), "App", &[r"..\Lib\Lib.csproj", r"..\X\X.csproj"]);
        let lib = project(temp.path(), "Lib", &[r"..\Y\Y.csproj"]);
        project(temp.path(), "X", &[]);
        project(temp.path(), "Y", &[]);

        let log = MemoryLog::new();
        let found =
            ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[app, lib]);
        assert_eq!(stems(&found), vec!["X", "Y"]);
    }

    #[test]
    fn test_unreadable_project_keeps_siblings_and_itself() {
        let temp = TempDir::new().unwrap();
        let app = project(
            temp.path(),
            "App",
            &[r"..\Missing\Missing.csproj", r"..\Broken\Broken.csproj", r"..\Ok\Ok.csproj"],
        );
        let broken_dir = temp.path().join("Broken");
        fs::create_dir_all(&broken_dir).unwrap();
        fs::write(broken_dir.join("Broken.csproj"), "<Project><ItemGroup>").unwrap();
        project(temp.path(), "Ok", &[]);

        let log = MemoryLog::new();
        let found = ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[app]);
        assert_eq!(stems(&found), vec!["Missing", "Broken", "Ok"]);
        let failures = log
            .messages()
            .iter()
            .filter(|m| m.starts_with("*** FAILED to read project references. ***"))
            .count();
        assert_eq!(failures, 2);
    }

    #[test]
    fn test_unreadable_root_contributes_nothing() {
        let temp = TempDir::new().unwrap();
        let missing = ProjectPath::new(temp.path().join("Nope/Nope.csproj")).unwrap();
        let app = project(temp.path(), "App", &[r"..\Lib\Lib.csproj"]);
        project(temp.path(), "Lib", &[]);

        let log = MemoryLog::new();
        let found =
            ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[missing, app]);
        assert_eq!(stems(&found), vec!["Lib"]);
    }

    #[test]
    fn test_macros_resolved_with_owning_project_properties() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().to_string_lossy().into_owned();
        let app = project(temp.path(), "App", &[r"$(LibDir)\Lib.csproj"]);
        project(temp.path(), "Lib", &[r"$(LibDir)\..\Core\Core.csproj"]);
        project(temp.path(), "Core", &[]);

        let mut app_props = HashMap::new();
        app_props.insert("LibDir".to_string(), format!("{root}/Lib"));
        let mut lib_props = HashMap::new();
        lib_props.insert("LibDir".to_string(), ".".to_string());
        let mut by_project = HashMap::new();
        by_project.insert("App".to_string(), app_props);
        by_project.insert("Lib".to_string(), lib_props);

        let log = MemoryLog::new();
        let provider = PerProject(by_project);
        let found = ReferenceTraversal::new(&provider, &log).collect_transitive_references(&[app]);
        assert_eq!(stems(&found), vec!["Lib", "Core"]);
        assert!(log.contains("$(LibDir) = ."));
    }

    #[test]
    fn test_unresolvable_reference_is_skipped() {
        let temp = TempDir::new().unwrap();
        let app = project(temp.path(), "App", &["$(Nothing)", r"..\Lib\Lib.csproj"]);
        project(temp.path(), "Lib", &[]);

        let log = MemoryLog::new();
        let found = ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[app]);
        assert_eq!(stems(&found), vec!["Lib"]);
        assert!(log.contains("*** FAILED to resolve project reference. ***"));
    }

    #[test]
    fn test_duplicate_roots_are_harmless() {
        let temp = TempDir::new().unwrap();
        let app = project(temp.path(), "App", &[r"..\Lib\Lib.csproj"]);
        project(temp.path(), "Lib", &[]);

        let log = MemoryLog::new();
        let found = ReferenceTraversal::new(&Plain, &log)
            .collect_transitive_references(&[app.clone(), app]);
        assert_eq!(stems(&found), vec!["Lib"]);
    }

    #[test]
    #[cfg(unix)]
    fn test_root_reached_through_symlink_is_not_rediscovered() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        project(&real, "A", &[r"..\B\B.csproj"]);
        project(&real, "B", &[r"..\A\A.csproj"]);
        std::os::unix::fs::symlink(&real, temp.path().join("link")).unwrap();
        let linked_root =
            ProjectPath::new(temp.path().join("link").join("A").join("A.csproj")).unwrap();

        let log = MemoryLog::new();
        let found = ReferenceTraversal::new(&Plain, &log)
            .with_canonicalizer(PathCanonicalizer::new().with_symlink_resolution(true))
            .collect_transitive_references(&[linked_root]);

        assert_eq!(stems(&found), vec!["B"]);
        assert!(found[0].as_path().starts_with(fs::canonicalize(&real).unwrap()));
        assert!(log.failures().is_empty());
    }

    #[test]
    fn test_failures_are_reported_as_failures() {
        let temp = TempDir::new().unwrap();
        let app = project(temp.path(), "App", &[r"..\Lib\Lib.csproj", "$(Missing)"]);
        project(temp.path(), "Lib", &[]);

        let log = MemoryLog::new();
        let _ = ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[app]);

        let failures = log.failures();
        assert!(failures.iter().any(|m| m.contains("$(Missing) is not defined")));
        assert!(failures
            .iter()
            .any(|m| m.starts_with("*** FAILED to resolve project reference. ***")));
        assert!(failures.iter().all(|m| !m.contains(" -> /")));
        assert!(log.contains("App.csproj -> "));
    }

    #[test]
    fn test_no_roots() {
        let log = MemoryLog::new();
        let found = ReferenceTraversal::new(&Plain, &log).collect_transitive_references(&[]);
        assert!(found.is_empty());
    }

    #[cfg(feature = "property-tests")]
    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn found_projects_are_unique_and_exclude_roots(
                edges in prop::collection::vec(prop::collection::vec(0usize..6, 0..4), 6),
                root_count in 1usize..3,
            ) {
                let temp = TempDir::new().unwrap();
                let names: Vec<String> = (0..edges.len()).map(|i| format!("P{i}")).collect();
                let projects: Vec<ProjectPath> = edges
                    .iter()
                    .zip(&names)
                    .map(|(targets, name)| {
                        let references: Vec<String> = targets
                            .iter()
                            .map(|t| format!(r"..\P{t}\P{t}.csproj"))
                            .collect();
                        let references: Vec<&str> = references.iter().map(String::as_str).collect();
                        project(temp.path(), name, &references)
                    })
                    .collect();

                let roots = &projects[..root_count];
                let log = MemoryLog::new();
                let found =
                    ReferenceTraversal::new(&Plain, &log).collect_transitive_references(roots);

                let unique: std::collections::HashSet<_> = found.iter().collect();
                prop_assert_eq!(unique.len(), found.len());
                prop_assert!(found.iter().all(|p| !roots.contains(p)));
            }
        }
    }
}
