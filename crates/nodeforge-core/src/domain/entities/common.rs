use super::DomainError;
use std::fmt;
use std::path::PathBuf;

/// A project-relative path, always written with `/` separators.
///
/// Invariant: never absolute, never empty, never escapes the project root.
/// Enforced at construction. Plans are compared byte-for-byte, so the
/// separator is fixed regardless of host platform; [`RelativePath::to_path`]
/// converts when a real path is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if the path is invalid (use `try_new` for fallible).
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        match Self::try_new(path.clone()) {
            Ok(p) => p,
            Err(_) => panic!("RelativePath must be relative and non-empty: {path:?}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();
        let absolute = path.starts_with('/')
            || path.starts_with('\\')
            || path.as_bytes().get(1) == Some(&b':');
        let escapes = path.split('/').any(|segment| segment == "..");
        if path.is_empty() || absolute || escapes || path.contains('\\') {
            return Err(DomainError::AbsolutePathNotAllowed { path });
        }
        Ok(Self(path.trim_end_matches('/').to_string()))
    }

    /// Join a segment, maintaining the relative invariant.
    pub fn join(&self, segment: &str) -> Result<Self, DomainError> {
        Self::try_new(format!("{}/{}", self.0, segment))
    }

    /// Parent directory, or `None` for top-level entries.
    pub fn parent(&self) -> Option<Self> {
        self.0
            .rsplit_once('/')
            .map(|(parent, _)| Self(parent.to_string()))
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Host-platform path relative to the project root.
    pub fn to_path(&self) -> PathBuf {
        self.0.split('/').collect()
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_absolute_and_escaping_paths() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
        assert!(RelativePath::try_new("C:/x").is_err());
        assert!(RelativePath::try_new("src/../../x").is_err());
        assert!(RelativePath::try_new("src\\app.ts").is_err());
        assert!(RelativePath::try_new("").is_err());
    }

    #[test]
    fn parent_and_file_name() {
        let p = RelativePath::new("src/routes/health.ts");
        assert_eq!(p.parent().unwrap().as_str(), "src/routes");
        assert_eq!(p.file_name(), "health.ts");
        assert!(RelativePath::new("package.json").parent().is_none());
    }

    #[test]
    fn join_and_to_path() {
        let p = RelativePath::new("src").join("app.ts").unwrap();
        assert_eq!(p.as_str(), "src/app.ts");
        assert_eq!(p.to_path(), PathBuf::from("src").join("app.ts"));
    }
}
