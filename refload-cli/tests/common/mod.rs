//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Fixture writers for projects and solution files
//! - Command builders isolated from the user's configuration

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Type GUID of C# projects in solution files.
pub const CSHARP_PROJECT_TYPE: &str = "FAE04EC0-301F-11D3-BF4B-00C04F79EFBC";

/// Test environment with an isolated working and configuration directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Directory passed as `--config-dir`
    pub config_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let config_dir = temp_path.join("refload-config");

        Self {
            temp_dir,
            temp_path,
            config_dir,
        }
    }

    /// Get a bare command builder without pre-configured flags.
    ///
    /// The working directory is the temporary directory and no `REFLOAD_*`
    /// variable leaks in from the test runner.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("refload").expect("Failed to find refload binary");
        cmd.current_dir(&self.temp_path);
        for key in [
            "REFLOAD_CONFIG_DIR",
            "REFLOAD_LOG_MODE",
            "REFLOAD_FOLLOW_SYMLINKS",
            "REFLOAD_ENVIRONMENT_FALLBACK",
            "REFLOAD_OUTPUT_FORMAT",
            "REFLOAD_PROPERTIES",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Get a command builder with the configuration directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config-dir").arg(&self.config_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file relative to the temp path, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create test directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write `<name>/<name>.csproj` with one `ProjectReference` per entry.
    pub fn project(&self, name: &str, references: &[&str]) -> PathBuf {
        let items: String = references
            .iter()
            .map(|r| format!("    <ProjectReference Include=\"{r}\" />\n"))
            .collect();
        self.write(
            &format!("{name}/{name}.csproj"),
            &format!("<Project>\n  <ItemGroup>\n{items}  </ItemGroup>\n</Project>\n"),
        )
    }

    /// Write a project that also imports a shared project.
    pub fn project_with_shared(&self, name: &str, references: &[&str], shared: &str) -> PathBuf {
        let items: String = references
            .iter()
            .map(|r| format!("    <ProjectReference Include=\"{r}\" />\n"))
            .collect();
        self.write(
            &format!("{name}/{name}.csproj"),
            &format!(
                "<Project>\n  <Import Project=\"..\\{shared}\\{shared}.projitems\" Label=\"Shared\" />\n  \
                 <ItemGroup>\n{items}  </ItemGroup>\n</Project>\n"
            ),
        )
    }

    /// Write `<name>/<name>.projitems` and `<name>/<name>.shproj`.
    pub fn shared_project(&self, name: &str) -> PathBuf {
        self.write(&format!("{name}/{name}.projitems"), "<Project />\n");
        self.write(&format!("{name}/{name}.shproj"), "<Project />\n")
    }

    /// Write a solution file listing `<name>/<name>.csproj` for each name.
    pub fn solution(&self, file_name: &str, names: &[&str]) -> PathBuf {
        let mut contents = String::from(
            "\u{feff}\nMicrosoft Visual Studio Solution File, Format Version 12.00\n",
        );
        for (index, name) in names.iter().enumerate() {
            contents.push_str(&format!(
                "Project(\"{{{CSHARP_PROJECT_TYPE}}}\") = \"{name}\", \"{name}\\{name}.csproj\", \
                 \"{{00000000-0000-0000-0000-{index:012}}}\"\nEndProject\n"
            ));
        }
        self.write(file_name, &contents)
    }

    /// Path of `<name>/<name>.csproj` as the CLI prints it.
    pub fn project_path(&self, name: &str) -> String {
        self.temp_path
            .join(name)
            .join(format!("{name}.csproj"))
            .display()
            .to_string()
    }

    /// Run a command expected to succeed and return its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run refload");

        assert!(
            output.status.success(),
            "refload {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// The file stem of every printed path line, in order.
#[allow(dead_code)]
pub fn stems(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(|line| {
            let path = line.rsplit('\t').next().unwrap_or(line);
            Path::new(path)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect()
}
