//! Where a project lands on disk, and what happens when that spot is taken.
//!
//! The planner only accepts a [`ConfirmedProject`], and the only way to get
//! one is through the application service, which checks the target
//! directory first. A name conflict is therefore resolved before any plan
//! exists.

use std::path::{Path, PathBuf};

use crate::domain::{entities::config::ProjectConfig, value_objects::ProjectName};

/// How the project root relates to what is already on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Nothing exists at the target path.
    Fresh,
    /// A directory exists and the user agreed to replace it.
    Overwrite,
}

/// A configuration whose target directory has been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedProject {
    config: ProjectConfig,
    parent: PathBuf,
    placement: Placement,
}

impl ConfirmedProject {
    /// Construction is restricted to the crate so callers cannot skip the
    /// existence check.
    pub(crate) fn new(config: ProjectConfig, parent: PathBuf, placement: Placement) -> Self {
        Self {
            config,
            parent,
            placement,
        }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn parent(&self) -> &Path {
        &self.parent
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// `<parent>/<name>`.
    pub fn root(&self) -> PathBuf {
        self.parent.join(self.config.name().as_str())
    }
}

/// The target directory already exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    config: ProjectConfig,
    parent: PathBuf,
}

impl NameConflict {
    pub(crate) fn new(config: ProjectConfig, parent: PathBuf) -> Self {
        Self { config, parent }
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn parent(&self) -> &Path {
        &self.parent
    }

    pub fn existing_path(&self) -> PathBuf {
        self.parent.join(self.config.name().as_str())
    }

    /// `<name>-new`, the name offered by default when renaming.
    pub fn suggested_name(&self) -> Option<ProjectName> {
        ProjectName::parse(format!("{}-new", self.config.name())).ok()
    }

    pub(crate) fn into_parts(self) -> (ProjectConfig, PathBuf) {
        (self.config, self.parent)
    }
}

/// The user's answer to a [`NameConflict`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictResolution {
    Overwrite,
    Rename(ProjectName),
    Abort,
}

/// Outcome of checking a configuration against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed(ConfirmedProject),
    Conflict(NameConflict),
}
