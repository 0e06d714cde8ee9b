//! A host backed by the filesystem.
//!
//! [`FileSystemSolution`] implements the host traits on top of a `.sln` file
//! (or a plain list of project files) so that reference resolution and
//! solution loading run without an IDE. Additions are recorded in memory;
//! the solution file on disk is never rewritten.
//!
//! Project properties follow the build system's reserved names:
//!
//! | Property | Value |
//! |----------|-------|
//! | `MSBuildProjectDirectory` | directory of the project file |
//! | `MSBuildThisFileDirectory` | same, with a trailing separator |
//! | `MSBuildProjectFile` | file name with extension |
//! | `MSBuildProjectName` | file name without extension |
//! | `MSBuildProjectExtension` | extension with the leading dot |
//! | `MSBuildProjectFullPath` | full path of the project file |
//! | `SolutionDir` | solution directory, with a trailing separator |
//! | `SolutionName`, `SolutionFileName`, `SolutionPath`, `SolutionExt` | solution file parts |
//!
//! Reserved names win over configured global properties, which win over the
//! solution properties. Anything else falls back to the process environment
//! unless that is disabled. Property names are matched case-insensitively.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, MAIN_SEPARATOR};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::host::{ItemId, LogSink, ProjectHierarchy, PropertyLookup, PropertyProvider, SolutionHost};
use crate::macros::resolve_macros;
use crate::path::{normalize, PathCanonicalizer, ProjectPath};
use crate::references::ReferenceExtractor;

/// Type GUID of solution folders, which are not projects.
pub const SOLUTION_FOLDER_TYPE_GUID: &str = "2150E333-8FDC-42A3-9474-1A3956D46DE8";

const SOLUTION_HEADER: &str = "Microsoft Visual Studio Solution File";

/// One project entry of a solution file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionProject {
    /// Display name of the project.
    pub name: String,
    /// Canonical path of the project file.
    pub path: ProjectPath,
    /// Project type GUID, without braces.
    pub type_guid: String,
    /// Project instance GUID, without braces.
    pub project_guid: String,
}

/// A parsed `.sln` file.
#[derive(Debug, Clone)]
pub struct SolutionFile {
    path: ProjectPath,
    projects: Vec<SolutionProject>,
}

impl SolutionFile {
    /// Parse the solution file at `path`.
    ///
    /// Solution folders and web-site entries addressed by URL are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSolution`] if the file cannot be read, lacks
    /// the solution header, or has a malformed `Project` line.
    pub fn parse(path: &Path) -> Result<Self> {
        let solution_path = ProjectPath::new(path)?;
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidSolution {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse_str(solution_path, &contents)
    }

    fn parse_str(path: ProjectPath, contents: &str) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidSolution {
            path: path.as_path().to_path_buf(),
            reason,
        };

        let has_header = contents
            .lines()
            .map(|line| line.trim_start_matches('\u{feff}').trim())
            .any(|line| line.starts_with(SOLUTION_HEADER));
        if !has_header {
            return Err(invalid("missing solution file header".to_string()));
        }

        let mut projects = Vec::new();

        for (index, line) in contents.lines().enumerate() {
            let line = line.trim();
            let Some(rest) = line.strip_prefix("Project(") else {
                continue;
            };

            let entry = parse_project_line(rest)
                .ok_or_else(|| invalid(format!("malformed project entry on line {}", index + 1)))?;

            if entry.type_guid.eq_ignore_ascii_case(SOLUTION_FOLDER_TYPE_GUID)
                || entry.relative_path.contains("://")
            {
                continue;
            }

            let relative = normalize::unify_separators(&entry.relative_path);
            let absolute = normalize::absolutize(path.directory(), &relative)?;
            projects.push(SolutionProject {
                name: entry.name,
                path: ProjectPath::new(absolute)?,
                type_guid: entry.type_guid,
                project_guid: entry.project_guid,
            });
        }

        log::debug!("{path} lists {} project(s)", projects.len());
        Ok(Self { path, projects })
    }

    /// The solution file's own path.
    #[must_use]
    pub fn path(&self) -> &ProjectPath {
        &self.path
    }

    /// The projects listed in the solution, in file order.
    #[must_use]
    pub fn projects(&self) -> &[SolutionProject] {
        &self.projects
    }
}

struct ProjectLine {
    type_guid: String,
    name: String,
    relative_path: String,
    project_guid: String,
}

/// Parse the part of a `Project(` line after the opening parenthesis:
/// `"{TYPE}") = "Name", "relative\path", "{GUID}"`.
///
/// Values are the quoted fields; commas inside quotes belong to the value.
fn parse_project_line(rest: &str) -> Option<ProjectLine> {
    let (type_part, values) = rest.split_once(')')?;
    let values = values.trim_start().strip_prefix('=')?.trim();

    let inner = values.strip_prefix('"')?.strip_suffix('"')?;
    let mut fields = inner.split("\", \"");
    let name = fields.next()?.to_string();
    let relative_path = fields.next()?.to_string();
    let project_guid = strip_braces(fields.next()?);

    if relative_path.is_empty() || fields.next().is_some() {
        return None;
    }

    Some(ProjectLine {
        type_guid: strip_braces(type_part.trim().trim_matches('"')),
        name,
        relative_path,
        project_guid,
    })
}

fn strip_braces(guid: &str) -> String {
    guid.trim_start_matches('{').trim_end_matches('}').to_string()
}

/// The properties of one project, as seen by macro resolution.
#[derive(Debug, Clone)]
pub struct ProjectProperties {
    values: HashMap<String, String>,
    environment_fallback: bool,
}

impl ProjectProperties {
    /// Properties outside any project: the configured globals only.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let mut properties = Self {
            values: HashMap::new(),
            environment_fallback: config.uses_environment_fallback(),
        };
        for (name, value) in config.global_properties() {
            properties.insert(&name, value);
        }
        properties
    }

    fn insert(&mut self, name: &str, value: String) {
        self.values.insert(name.to_ascii_lowercase(), value);
    }
}

impl PropertyLookup for ProjectProperties {
    fn get(&self, name: &str) -> Result<Option<String>> {
        if let Some(value) = self.values.get(&name.to_ascii_lowercase()) {
            return Ok(Some(value.clone()));
        }

        if !self.environment_fallback || name.is_empty() || name.contains(['=', '\0']) {
            return Ok(None);
        }

        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(Error::PropertyLookupFailed {
                name: name.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}

/// A project loaded from disk.
#[derive(Debug, Clone)]
pub struct FileSystemProject {
    path: ProjectPath,
    raw_imports: Vec<String>,
    imports: Vec<String>,
    import_diagnostics: Vec<Diagnostic>,
}

impl FileSystemProject {
    fn open(path: ProjectPath) -> Self {
        let raw_imports = ReferenceExtractor::new()
            .extract_shared_imports(path.as_path())
            .unwrap_or_else(|e| {
                log::debug!("no shared imports for {path}: {e}");
                Vec::new()
            });

        Self {
            path,
            imports: raw_imports.clone(),
            raw_imports,
            import_diagnostics: Vec::new(),
        }
    }

    /// The shared-items imports, macro-expanded and made absolute.
    #[must_use]
    pub fn shared_imports(&self) -> &[String] {
        &self.imports
    }
}

impl ProjectHierarchy for FileSystemProject {
    fn project_path(&self) -> &ProjectPath {
        &self.path
    }

    fn shared_items_imports(&self, log: &dyn LogSink) -> Option<String> {
        for diagnostic in &self.import_diagnostics {
            diagnostic.replay(log);
        }
        (!self.imports.is_empty()).then(|| self.imports.join("|"))
    }

    fn parse_canonical_name(&self, name: &str) -> Option<ItemId> {
        self.imports
            .iter()
            .position(|import| import == name)
            .and_then(|index| u32::try_from(index).ok())
            .map(ItemId)
    }

    /// Shared projects are never attached to an import on disk; whether one
    /// is loaded is decided by the solution's unique-name lookup.
    fn has_shared_project_hierarchy(&self, _item: ItemId) -> bool {
        false
    }
}

/// One line logged while a project's imports were expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Diagnostic {
    Note(String),
    Failure(String),
}

impl Diagnostic {
    fn replay(&self, log: &dyn LogSink) {
        match self {
            Self::Note(message) => log.write(message),
            Self::Failure(message) => log.failure(message),
        }
    }
}

/// Holds import-expansion diagnostics until the imports are asked for.
#[derive(Default)]
struct RecordingLog(RefCell<Vec<Diagnostic>>);

impl LogSink for RecordingLog {
    fn write(&self, message: &str) {
        self.0.borrow_mut().push(Diagnostic::Note(message.to_string()));
    }

    fn failure(&self, message: &str) {
        self.0.borrow_mut().push(Diagnostic::Failure(message.to_string()));
    }
}

/// A solution whose projects live on disk.
///
/// # Examples
///
/// ```no_run
/// use refload::fs_host::FileSystemSolution;
/// use refload::host::SolutionHost;
/// use std::path::Path;
///
/// let solution = FileSystemSolution::from_solution_file(Path::new("App.sln")).unwrap();
/// for project in solution.loaded_projects() {
///     println!("{project}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemSolution {
    solution: Option<ProjectPath>,
    projects: Vec<FileSystemProject>,
    added: Vec<ProjectPath>,
    globals: HashMap<String, String>,
    environment_fallback: bool,
    canonicalizer: PathCanonicalizer,
}

impl FileSystemSolution {
    /// Open the projects listed in a `.sln` file.
    ///
    /// Listed projects whose files are missing stay in the solution, but
    /// they declare nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the solution file cannot be parsed.
    pub fn from_solution_file(path: &Path) -> Result<Self> {
        let solution = SolutionFile::parse(path)?;
        let mut host = Self::from_projects(solution.projects().iter().map(|p| p.path.clone()));
        host.solution = Some(solution.path().clone());
        host.expand_imports();
        Ok(host)
    }

    /// Open an explicit set of projects with no solution file.
    ///
    /// Duplicates are loaded once.
    pub fn from_projects(paths: impl IntoIterator<Item = ProjectPath>) -> Self {
        let mut host = Self {
            solution: None,
            projects: Vec::new(),
            added: Vec::new(),
            globals: HashMap::new(),
            environment_fallback: true,
            canonicalizer: PathCanonicalizer::new(),
        };

        for path in paths {
            if !host.contains(&path) {
                host.projects.push(FileSystemProject::open(path));
            }
        }

        host.expand_imports();
        host
    }

    /// Apply the global properties, environment fallback and path
    /// canonicalization of `config`.
    ///
    /// With symlink resolution on, projects listed under two spellings of
    /// the same file are loaded once.
    #[must_use]
    pub fn with_config(mut self, config: &Config) -> Self {
        self.globals = config.global_properties().into_iter().collect();
        self.environment_fallback = config.uses_environment_fallback();
        self.canonicalizer = config.path_canonicalizer();

        let mut seen = HashSet::new();
        let projects: Vec<FileSystemProject> = std::mem::take(&mut self.projects)
            .into_iter()
            .filter(|project| seen.insert(self.key(&project.path)))
            .collect();
        self.projects = projects;

        self.expand_imports();
        self
    }

    /// The solution file, if the host was opened from one.
    #[must_use]
    pub fn solution_path(&self) -> Option<&ProjectPath> {
        self.solution.as_ref()
    }

    /// Projects added since the host was opened, in order.
    #[must_use]
    pub fn added_projects(&self) -> &[ProjectPath] {
        &self.added
    }

    /// The loaded project with the given path, under any spelling the
    /// configured canonicalization considers the same file.
    #[must_use]
    pub fn project(&self, path: &ProjectPath) -> Option<&FileSystemProject> {
        if let Some(project) = self.projects.iter().find(|p| &p.path == path) {
            return Some(project);
        }
        if !self.canonicalizer.follows_symlinks() {
            return None;
        }
        let key = self.key(path);
        self.projects.iter().find(|p| self.key(&p.path) == key)
    }

    /// The properties macro resolution sees for `project`.
    #[must_use]
    pub fn project_properties(&self, project: &ProjectPath) -> ProjectProperties {
        let mut properties = ProjectProperties {
            values: HashMap::new(),
            environment_fallback: self.environment_fallback,
        };

        if let Some(solution) = &self.solution {
            let directory = with_trailing_separator(solution.directory());
            properties.insert("SolutionDir", directory);
            properties.insert("SolutionPath", solution.to_string());
            if let Some(name) = solution.file_stem() {
                properties.insert("SolutionName", name.to_string());
            }
            if let Some(file_name) = solution.as_path().file_name() {
                properties.insert("SolutionFileName", file_name.to_string_lossy().into_owned());
            }
            if let Some(ext) = solution.extension() {
                properties.insert("SolutionExt", format!(".{ext}"));
            }
        }

        for (name, value) in &self.globals {
            properties.insert(name, value.clone());
        }

        let directory = project.directory();
        properties.insert("MSBuildProjectDirectory", directory.display().to_string());
        properties.insert("MSBuildThisFileDirectory", with_trailing_separator(directory));
        properties.insert("MSBuildProjectFullPath", project.to_string());
        if let Some(file_name) = project.as_path().file_name() {
            properties.insert("MSBuildProjectFile", file_name.to_string_lossy().into_owned());
        }
        if let Some(name) = project.file_stem() {
            properties.insert("MSBuildProjectName", name.to_string());
        }
        if let Some(ext) = project.extension() {
            properties.insert("MSBuildProjectExtension", format!(".{ext}"));
        }

        properties
    }

    fn contains(&self, path: &ProjectPath) -> bool {
        self.project(path).is_some()
    }

    /// The path projects are compared by. A path that cannot be resolved
    /// is compared as written.
    fn key(&self, path: &ProjectPath) -> ProjectPath {
        self.canonicalizer
            .canonicalize_project(path)
            .unwrap_or_else(|e| {
                log::debug!("comparing {path} as written: {e}");
                path.clone()
            })
    }

    /// Recompute every project's expanded imports from its raw imports.
    fn expand_imports(&mut self) {
        let expanded: Vec<_> = self
            .projects
            .iter()
            .map(|project| self.expand_project_imports(project))
            .collect();

        for (project, (imports, diagnostics)) in self.projects.iter_mut().zip(expanded) {
            project.imports = imports;
            project.import_diagnostics = diagnostics;
        }
    }

    fn expand_project_imports(
        &self,
        project: &FileSystemProject,
    ) -> (Vec<String>, Vec<Diagnostic>) {
        if project.raw_imports.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let properties = self.project_properties(&project.path);
        let recorder = RecordingLog::default();
        let imports = project
            .raw_imports
            .iter()
            .map(|import| {
                let expanded = resolve_macros(import, &properties, &recorder);
                let relative = normalize::unify_separators(&expanded);
                match normalize::absolutize(project.path.directory(), &relative) {
                    Ok(absolute) => absolute.to_string_lossy().into_owned(),
                    Err(_) => expanded,
                }
            })
            .collect();

        (imports, recorder.0.into_inner())
    }
}

fn with_trailing_separator(directory: &Path) -> String {
    let mut text = directory.display().to_string();
    if !text.ends_with(MAIN_SEPARATOR) {
        text.push(MAIN_SEPARATOR);
    }
    text
}

impl PropertyProvider for FileSystemSolution {
    fn properties_for(&self, project: &ProjectPath) -> Box<dyn PropertyLookup + '_> {
        Box::new(self.project_properties(project))
    }
}

impl SolutionHost for FileSystemSolution {
    fn loaded_projects(&self) -> Vec<ProjectPath> {
        self.projects.iter().map(|p| p.path.clone()).collect()
    }

    fn project_of_unique_name(&self, unique_name: &str) -> Option<&dyn ProjectHierarchy> {
        let path = ProjectPath::new(unique_name).ok()?;
        self.project(&path).map(|p| p as &dyn ProjectHierarchy)
    }

    fn add_existing_project(&mut self, path: &ProjectPath) -> Result<()> {
        if !path.as_path().is_file() {
            return Err(Error::AddProjectFailed {
                path: path.as_path().to_path_buf(),
                reason: "project file does not exist".to_string(),
            });
        }

        if self.contains(path) {
            return Ok(());
        }

        let mut project = FileSystemProject::open(path.clone());
        (project.imports, project.import_diagnostics) = self.expand_project_imports(&project);
        self.projects.push(project);
        self.added.push(path.clone());
        Ok(())
    }
}
