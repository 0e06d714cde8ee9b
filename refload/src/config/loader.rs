//! Finding and reading configuration files.
//!
//! Three files can contribute, from weakest to strongest:
//!
//! | Scope | File |
//! |-------|------|
//! | [`ConfigScope::User`] | `config.yaml` in the user directory (`~/.refload`) |
//! | [`ConfigScope::Project`] | `refload.yaml` in the nearest ancestor that has one |
//! | [`ConfigScope::Local`] | `refload.local.yaml` beside it |

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "refload.yaml";

/// Name of the private, uncommitted project configuration file.
pub const LOCAL_CONFIG_FILE: &str = "refload.local.yaml";

const USER_CONFIG_FILE: &str = "config.yaml";

/// Where a configuration file was found. Later variants override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigScope {
    /// The per-user configuration directory.
    User,
    /// A committed `refload.yaml`.
    Project,
    /// A `refload.local.yaml` next to the project file.
    Local,
}

/// One configuration file and what it sets.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// The file the configuration came from.
    pub path: PathBuf,
    /// How strongly it applies.
    pub scope: ConfigScope,
    /// The file's contents.
    pub config: Config,
}

/// Reads configuration files from disk.
///
/// # Examples
///
/// ```no_run
/// use refload::config::ConfigLoader;
/// use std::path::Path;
///
/// for source in ConfigLoader::load_all(Path::new("."), None).unwrap() {
///     println!("{:?}: {}", source.scope, source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Every configuration file that applies to `working_dir`, weakest first.
    ///
    /// The user file is read from `user_dir` when given, else from
    /// [`default_data_dir`].
    ///
    /// # Errors
    ///
    /// Fails if a file exists but cannot be read or parsed, or if no user
    /// directory is given and the home directory is unknown.
    pub fn load_all(working_dir: &Path, user_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let user_dir = match user_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir()?,
        };

        let mut sources: Vec<ConfigSource> =
            Self::read_if_present(user_dir.join(USER_CONFIG_FILE), ConfigScope::User)?
                .into_iter()
                .collect();
        sources.extend(Self::discover_project_configs(working_dir)?);
        sources.sort_by_key(|source| source.scope);

        Ok(sources)
    }

    /// The project and local files of the nearest directory, starting at
    /// `start_dir` and moving toward the root, that has either.
    ///
    /// # Errors
    ///
    /// Fails if a discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        for dir in start_dir.ancestors() {
            let mut found = Vec::new();
            for (name, scope) in [
                (PROJECT_CONFIG_FILE, ConfigScope::Project),
                (LOCAL_CONFIG_FILE, ConfigScope::Local),
            ] {
                found.extend(Self::read_if_present(dir.join(name), scope)?);
            }
            if !found.is_empty() {
                return Ok(found);
            }
        }
        Ok(Vec::new())
    }

    fn read_if_present(path: PathBuf, scope: ConfigScope) -> Result<Option<ConfigSource>> {
        if !path.is_file() {
            return Ok(None);
        }
        let config = Self::load_file(&path)?;
        log::debug!("read {scope:?} configuration from {}", path.display());
        Ok(Some(ConfigSource {
            path,
            scope,
            config,
        }))
    }

    /// Parse one YAML configuration file. A blank file sets nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] if the file cannot be read and
    /// [`Error::Validation`], naming the file, if it is not a valid
    /// configuration.
    pub fn load_file(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("cannot read configuration: {e}"),
        })?;

        if text.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&text).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("not a valid configuration: {e}"),
        })
    }
}

/// The per-user configuration directory, `~/.refload`.
///
/// # Errors
///
/// Fails when the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "home directory is unknown".into(),
    })?;
    Ok(home.join(".refload"))
}
