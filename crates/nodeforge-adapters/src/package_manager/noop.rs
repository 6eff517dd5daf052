use std::path::Path;

use nodeforge_core::{application::ports::PackageManager, domain::InstallStep, error::ForgeResult};
use tracing::info;

/// Skips installation (`--skip-install`), logging what would have run.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPackageManager;

impl NoopPackageManager {
    pub fn new() -> Self {
        Self
    }
}

impl PackageManager for NoopPackageManager {
    fn name(&self) -> String {
        "skip".to_string()
    }

    fn install(&self, project_root: &Path, step: &InstallStep) -> ForgeResult<()> {
        info!(
            cwd = %project_root.display(),
            kind = %step.kind,
            packages = %step.packages.join(" "),
            "Skipping install"
        );
        Ok(())
    }
}
