//! Emission driver - walks a plan and performs its steps through the ports.
//!
//! The emitter never computes content. Text is written as planned, JSON
//! amendments are applied with the domain merge function, and install steps
//! are handed to the package manager. Any failure rolls back the project
//! directory.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, CancelFlag,
        ports::{Filesystem, PackageManager},
    },
    domain::{ArtifactContent, ArtifactSpec, CompositionPlan, ConfirmedProject, Placement, PlanStep},
    error::ForgeResult,
};

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub root: PathBuf,
    pub files: usize,
    pub directories: usize,
    pub install_steps: usize,
}

pub struct Emitter<'a> {
    filesystem: &'a dyn Filesystem,
    package_manager: &'a dyn PackageManager,
    cancel: &'a CancelFlag,
}

impl<'a> Emitter<'a> {
    pub fn new(
        filesystem: &'a dyn Filesystem,
        package_manager: &'a dyn PackageManager,
        cancel: &'a CancelFlag,
    ) -> Self {
        Self {
            filesystem,
            package_manager,
            cancel,
        }
    }

    /// Emit every step of `plan` under the project's root.
    #[instrument(
        skip_all,
        fields(
            run_id = %run_id,
            root = %project.root().display(),
            variant = %plan.variant(),
        )
    )]
    pub fn emit(
        &self,
        run_id: Uuid,
        project: &ConfirmedProject,
        plan: &CompositionPlan,
    ) -> ForgeResult<GenerationReport> {
        let root = project.root();

        match project.placement() {
            Placement::Overwrite if self.filesystem.exists(&root) => {
                warn!(path = %root.display(), "Removing existing directory");
                self.filesystem.remove_dir_all(&root)?;
            }
            Placement::Fresh if self.filesystem.exists(&root) => {
                return Err(ApplicationError::ProjectExists { path: root }.into());
            }
            _ => {}
        }

        match self.emit_all(&root, plan) {
            Ok(()) => {
                info!(
                    files = plan.file_count(),
                    directories = plan.directory_count(),
                    "Project written"
                );
                Ok(GenerationReport {
                    run_id,
                    root,
                    files: plan.file_count(),
                    directories: plan.directory_count(),
                    install_steps: plan.install_steps().count(),
                })
            }
            Err(e) => {
                warn!(error = %e, "Emission failed, attempting rollback");
                self.rollback(&root);
                Err(e)
            }
        }
    }

    fn emit_all(&self, root: &Path, plan: &CompositionPlan) -> ForgeResult<()> {
        self.filesystem.create_dir_all(root)?;

        for step in plan.steps() {
            if self.cancel.is_cancelled() {
                return Err(ApplicationError::Cancelled.into());
            }
            match step {
                PlanStep::Emit(artifact) => self.emit_artifact(root, artifact)?,
                PlanStep::Install(install) => {
                    info!(
                        tool = %self.package_manager.name(),
                        kind = %install.kind,
                        count = install.packages.len(),
                        "Installing dependencies"
                    );
                    self.package_manager.install(root, install)?;
                }
            }
        }

        Ok(())
    }

    fn emit_artifact(&self, root: &Path, artifact: &ArtifactSpec) -> ForgeResult<()> {
        let path = root.join(artifact.path.to_path());
        match &artifact.content {
            ArtifactContent::Directory => {
                debug!(path = %artifact.path, "mkdir");
                self.filesystem.create_dir_all(&path)
            }
            ArtifactContent::Text(content) => {
                debug!(path = %artifact.path, bytes = content.len(), "write");
                if let Some(parent) = path.parent() {
                    self.filesystem.create_dir_all(parent)?;
                }
                self.filesystem.write_file(&path, content)
            }
            ArtifactContent::JsonMerge(_) => {
                debug!(path = %artifact.path, "amend");
                let existing = self.filesystem.read_file(&path)?;
                let merged =
                    artifact
                        .amend(&existing)
                        .map_err(|e| ApplicationError::ManifestMerge {
                            path: path.clone(),
                            reason: e.to_string(),
                        })?;
                self.filesystem.write_file(&path, &merged)
            }
        }
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if !self.filesystem.exists(root) {
            return;
        }
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
