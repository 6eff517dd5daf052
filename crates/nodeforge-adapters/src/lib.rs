//! Infrastructure adapters for nodeforge.
//!
//! This crate implements the ports defined in `nodeforge-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod package_manager;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use package_manager::{CommandPackageManager, NoopPackageManager, PackageManagerKind};
