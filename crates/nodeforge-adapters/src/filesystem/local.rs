//! Local filesystem adapter using std::fs.

use std::io::{self, Write};
use std::path::Path;

use nodeforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ForgeError, ForgeResult},
};
use tempfile::NamedTempFile;

/// Production filesystem implementation using `std::fs`.
///
/// Files are written to a temporary sibling and renamed into place, so a
/// reader never observes a half-written file.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp =
            NamedTempFile::new_in(dir).map_err(|e| map_io_error(path, e, "create temp file"))?;
        tmp.write_all(content.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        tmp.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ForgeResult<String> {
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        std::fs::remove_dir_all(path).map_err(|e| map_io_error(path, e, "remove directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {operation}: {e}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let path = dir.path().join("package.json");

        fs.write_file(&path, "{}").unwrap();
        fs.write_file(&path, "{\"name\":\"x\"}").unwrap();
        assert_eq!(fs.read_file(&path).unwrap(), "{\"name\":\"x\"}");

        // No temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let err = fs
            .write_file(&dir.path().join("missing/app.ts"), "x")
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::FilesystemError { .. })
        ));
    }

    #[test]
    fn remove_dir_all_removes_tree() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let root = dir.path().join("demo");
        fs.create_dir_all(&root.join("src/routes")).unwrap();
        fs.write_file(&root.join("src/routes/health.ts"), "x").unwrap();

        fs.remove_dir_all(&root).unwrap();
        assert!(!fs.exists(&root));
    }
}
