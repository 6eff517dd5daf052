//! Spinner shown while the package manager runs.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use nodeforge_core::{application::ports::PackageManager, domain::InstallStep, error::ForgeResult};

const TICK: Duration = Duration::from_millis(80);

/// Wraps another [`PackageManager`] with an `indicatif` spinner per step.
pub struct ProgressPackageManager {
    inner: Box<dyn PackageManager>,
    visible: bool,
}

impl ProgressPackageManager {
    pub fn new(inner: Box<dyn PackageManager>, visible: bool) -> Self {
        Self { inner, visible }
    }

    fn spinner(&self, message: String) -> ProgressBar {
        if !self.visible {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})") {
            bar.set_style(style);
        }
        bar.set_message(message);
        bar.enable_steady_tick(TICK);
        bar
    }
}

impl PackageManager for ProgressPackageManager {
    fn name(&self) -> String {
        self.inner.name()
    }

    fn install(&self, project_root: &Path, step: &InstallStep) -> ForgeResult<()> {
        let bar = self.spinner(format!(
            "{} installing {} ({})",
            self.inner.name(),
            step.packages.join(" "),
            step.kind
        ));
        let result = self.inner.install(project_root, step);
        match &result {
            Ok(()) => bar.finish_with_message(format!("Installed {}", step.kind)),
            Err(_) => bar.abandon_with_message(format!("Failed to install {}", step.kind)),
        }
        result
    }
}
