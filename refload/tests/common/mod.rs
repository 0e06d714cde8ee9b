//! Common test utilities for integration tests.
//!
//! [`SolutionFixture`] lays out project files, shared projects and solution
//! files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use refload::ProjectPath;
use tempfile::TempDir;

/// Type GUID used for C# projects in generated solution files.
#[allow(dead_code)]
pub const CSHARP_PROJECT_TYPE: &str = "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC";

/// Type GUID used for shared projects in generated solution files.
#[allow(dead_code)]
pub const SHARED_PROJECT_TYPE: &str = "D954291E-2A0B-460D-934E-DC6B0785DB48";

/// A temporary source tree with one directory per project.
///
/// Project `Name` lives at `<root>/Name/Name.csproj`, so a sibling reference
/// is written as `..\Other\Other.csproj`.
pub struct SolutionFixture {
    temp: TempDir,
}

#[allow(dead_code)]
impl SolutionFixture {
    /// Create an empty source tree.
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// The root directory of the tree.
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Path of a `.csproj` created by [`project`](Self::project).
    pub fn project_path(&self, name: &str) -> ProjectPath {
        ProjectPath::new(self.root().join(name).join(format!("{name}.csproj"))).unwrap()
    }

    /// Path of a `.shproj` created by [`shared_project`](Self::shared_project).
    pub fn shared_project_path(&self, name: &str) -> ProjectPath {
        ProjectPath::new(self.root().join(name).join(format!("{name}.shproj"))).unwrap()
    }

    /// Write a project whose `ProjectReference` includes are `references`.
    pub fn project(&self, name: &str, references: &[&str]) -> ProjectPath {
        let items: String = references
            .iter()
            .map(|r| format!("    <ProjectReference Include=\"{r}\" />\n"))
            .collect();
        self.project_xml(
            name,
            &format!(
                "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <ItemGroup>\n{items}  </ItemGroup>\n</Project>\n"
            ),
        )
    }

    /// Write a project that imports the shared projects named in `shared`.
    pub fn project_with_shared(
        &self,
        name: &str,
        references: &[&str],
        shared: &[&str],
    ) -> ProjectPath {
        let items: String = references
            .iter()
            .map(|r| format!("    <ProjectReference Include=\"{r}\" />\n"))
            .collect();
        let imports: String = shared
            .iter()
            .map(|s| {
                format!("  <Import Project=\"..\\{s}\\{s}.projitems\" Label=\"Shared\" />\n")
            })
            .collect();
        self.project_xml(
            name,
            &format!("<Project>\n{imports}  <ItemGroup>\n{items}  </ItemGroup>\n</Project>\n"),
        )
    }

    /// Write a project with arbitrary contents.
    pub fn project_xml(&self, name: &str, contents: &str) -> ProjectPath {
        let path = self.write(&format!("{name}/{name}.csproj"), contents);
        ProjectPath::new(path).unwrap()
    }

    /// Write a shared project and its items file.
    pub fn shared_project(&self, name: &str) -> ProjectPath {
        self.write(
            &format!("{name}/{name}.projitems"),
            "<Project>\n  <ItemGroup />\n</Project>\n",
        );
        let path = self.write(
            &format!("{name}/{name}.shproj"),
            &format!(
                "<Project>\n  <Import Project=\"{name}.projitems\" Label=\"Shared\" />\n</Project>\n"
            ),
        );
        ProjectPath::new(path).unwrap()
    }

    /// Write a solution file listing `projects` (by name) at the root.
    ///
    /// Names ending in `.shproj` are listed as shared projects.
    pub fn solution(&self, file_name: &str, projects: &[&str]) -> PathBuf {
        let mut contents = String::from(
            "\nMicrosoft Visual Studio Solution File, Format Version 12.00\n# Visual Studio Version 17\n",
        );

        for (index, entry) in projects.iter().enumerate() {
            let (name, ext, type_guid) = match entry.strip_suffix(".shproj") {
                Some(name) => (name, "shproj", SHARED_PROJECT_TYPE),
                None => (*entry, "csproj", CSHARP_PROJECT_TYPE),
            };
            contents.push_str(&format!(
                "Project(\"{{{type_guid}}}\") = \"{name}\", \"{name}\\{name}.{ext}\", \"{{00000000-0000-0000-0000-{index:012}}}\"\nEndProject\n"
            ));
        }

        contents.push_str("Global\nEndGlobal\n");
        self.write(file_name, &contents)
    }

    /// Write a file relative to the root, creating directories as needed.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }
}

/// File stems of `paths`, in order.
#[allow(dead_code)]
pub fn stems(paths: &[ProjectPath]) -> Vec<String> {
    paths
        .iter()
        .filter_map(|p| p.file_stem().map(str::to_string))
        .collect()
}
