//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A package manager or other child process failed.
    #[error("{tool} failed while running `{command}`: {reason}")]
    ExternalToolFailure {
        tool: String,
        command: String,
        reason: String,
    },

    /// The user declined to resolve a name conflict.
    #[error("Generation aborted by user")]
    Aborted,

    /// Interrupted (Ctrl-C) while a step was running.
    #[error("Generation cancelled")]
    Cancelled,

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// The manifest on disk could not be amended.
    #[error("Could not update {path}: {reason}")]
    ManifestMerge { path: PathBuf, reason: String },

    /// Shared state lock was poisoned.
    #[error("Internal lock poisoned: {name}")]
    LockPoisoned { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::ExternalToolFailure { tool, .. } => vec![
                format!("Check that `{tool}` is installed and on your PATH"),
                "Re-run with --skip-install and install dependencies manually".into(),
                "Re-run with --verbose to see the tool output".into(),
            ],
            Self::Aborted => vec!["Nothing was written".into()],
            Self::Cancelled => vec!["Partially generated files were removed".into()],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name".into(),
            ],
            Self::ManifestMerge { path, .. } => vec![
                format!("Inspect {} for invalid JSON", path.display()),
                "The package manager may have rewritten it unexpectedly".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. }
            | Self::ManifestMerge { .. }
            | Self::LockPoisoned { .. } => ErrorCategory::Internal,
            Self::ExternalToolFailure { .. } => ErrorCategory::ExternalTool,
            Self::Aborted => ErrorCategory::Aborted,
            Self::Cancelled => ErrorCategory::Cancelled,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
        }
    }
}
