//! Capability traits for the host environment.
//!
//! The resolver never talks to a concrete IDE object model. Everything it needs
//! from the host is expressed through the narrow traits in this module, so any
//! object exposing these operations can stand in for the host, including the
//! filesystem-backed host in [`crate::fs_host`] and the doubles used in tests.
//!
//! All collaborators are queried from a single thread; none of the traits
//! require `Send` or `Sync`.

use std::collections::HashMap;
use std::path::Path;

use crate::error::Result;
use crate::path::ProjectPath;

/// Named-property lookup scoped to one project's persisted configuration.
///
/// `Ok(None)` means the property is not defined. `Err` means the storage
/// behind the lookup could not answer at all.
#[cfg_attr(test, mockall::automock)]
pub trait PropertyLookup {
    /// Look up a property by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyLookupFailed`](crate::Error::PropertyLookupFailed)
    /// when the underlying storage is unavailable.
    fn get(&self, name: &str) -> Result<Option<String>>;
}

impl PropertyLookup for HashMap<String, String> {
    fn get(&self, name: &str) -> Result<Option<String>> {
        Ok(HashMap::get(self, name).cloned())
    }
}

/// A lookup that defines no properties at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProperties;

impl PropertyLookup for NoProperties {
    fn get(&self, _name: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Hands out the property lookup of a specific project.
///
/// Macros in a reference declaration are always resolved against the
/// properties of the project that declares the reference.
pub trait PropertyProvider {
    /// Return the property lookup for `project`.
    fn properties_for(&self, project: &ProjectPath) -> Box<dyn PropertyLookup + '_>;
}

/// Identifier of an item inside a project hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

/// A loaded project in the host's object model.
pub trait ProjectHierarchy {
    /// The canonical path of the project file.
    fn project_path(&self) -> &ProjectPath;

    /// The directory containing the project file.
    fn project_dir(&self) -> &Path {
        self.project_path().directory()
    }

    /// The pipe-delimited list of shared-items import files, if any.
    ///
    /// Hosts that evaluate the import paths themselves report what went
    /// wrong during evaluation to `log`.
    fn shared_items_imports(&self, log: &dyn LogSink) -> Option<String>;

    /// Resolve an import path to the item that represents it in this project.
    fn parse_canonical_name(&self, name: &str) -> Option<ItemId>;

    /// Whether the item has a loaded shared-project hierarchy attached.
    fn has_shared_project_hierarchy(&self, item: ItemId) -> bool;
}

/// The solution the projects are loaded into.
///
/// Unique names are the host's stable identifiers for loaded projects; the
/// hosts in this crate use the canonical project path as the unique name.
pub trait SolutionHost: PropertyProvider {
    /// The paths of all projects currently loaded in the solution.
    fn loaded_projects(&self) -> Vec<ProjectPath>;

    /// Find a loaded project by its unique name.
    fn project_of_unique_name(&self, unique_name: &str) -> Option<&dyn ProjectHierarchy>;

    /// Add an existing project file to the solution.
    ///
    /// On success the project is reachable through
    /// [`project_of_unique_name`](Self::project_of_unique_name).
    ///
    /// # Errors
    ///
    /// Returns [`Error::AddProjectFailed`](crate::Error::AddProjectFailed) when
    /// the host refuses the project.
    fn add_existing_project(&mut self, path: &ProjectPath) -> Result<()>;
}

/// Append-only diagnostic output.
pub trait LogSink {
    /// Write one diagnostic line.
    fn write(&self, message: &str);

    /// Write a diagnostic line that reports a failure.
    ///
    /// Sinks that filter by level show failures before anything else. The
    /// default forwards to [`write`](Self::write).
    fn failure(&self, message: &str) {
        self.write(message);
    }
}
