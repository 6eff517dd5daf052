//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `nodeforge-adapters` crate provides implementations.

use crate::domain::InstallStep;
use crate::error::ForgeResult;
use std::path::Path;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `nodeforge_adapters::filesystem::LocalFilesystem` (production)
/// - `nodeforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are absolute project paths; the emitter joins every
/// `RelativePath` onto the confirmed project root before calling in.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it atomically if it exists.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Read a UTF-8 file.
    fn read_file(&self, path: &Path) -> ForgeResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;
}

/// Port for installing dependencies into a generated project.
///
/// Implemented by:
/// - `nodeforge_adapters::package_manager::CommandPackageManager` (npm, pnpm, yarn)
/// - `nodeforge_adapters::package_manager::NoopPackageManager` (`--skip-install`)
#[cfg_attr(test, mockall::automock)]
pub trait PackageManager: Send + Sync {
    /// Human-readable tool name, e.g. `npm`.
    fn name(&self) -> String;

    /// Install one step's packages with `project_root` as working directory.
    fn install(&self, project_root: &Path, step: &InstallStep) -> ForgeResult<()>;
}
