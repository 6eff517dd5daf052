// ============================================================================
// domain/error.rs - CONFIGURATION AND PLAN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (prompts re-ask after displaying them)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Configuration Errors (re-asked inline by the prompt layer)
    // ========================================================================
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("invalid port '{value}': must be an integer between 1 and 65535")]
    InvalidPort { value: String },

    #[error("invalid API version '{value}': expected 'v' followed by digits")]
    InvalidApiVersion { value: String },

    #[error("module system '{module_system}' is not supported yet")]
    UnsupportedModuleSystem { module_system: String },

    #[error("unknown language variant '{value}'")]
    UnknownLanguage { value: String },

    #[error("unknown module system '{value}'")]
    UnknownModuleSystem { value: String },

    #[error("unknown deployment helper '{value}'")]
    UnknownDeploymentHelper { value: String },

    #[error("'{name}' is not in the package catalog")]
    UnknownPackage { name: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    // ========================================================================
    // Plan Errors (bugs in the planner, never user input)
    // ========================================================================
    #[error("Duplicate path in plan: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("'{path}' is planned before its parent directory")]
    OrphanedArtifact { path: String },

    #[error("JSON amendment for '{path}' failed: {reason}")]
    InvalidAmendment { path: String, reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, '-', '_' and '.'".into(),
                "Do not start with '.' or '_'".into(),
                "Examples: demo-app, orders_api, svc1".into(),
            ],
            Self::InvalidPort { .. } => vec![
                "Pick a port between 1 and 65535".into(),
                "Common choices: 3000, 4000, 8080".into(),
            ],
            Self::InvalidApiVersion { .. } => vec!["Examples: v1, v2".into()],
            Self::UnsupportedModuleSystem { .. } => vec![
                "Only ES Modules can be generated at the moment".into(),
                "Re-run with --module esm".into(),
            ],
            Self::UnknownLanguage { .. } => vec!["Supported: ts, js".into()],
            Self::UnknownModuleSystem { .. } => vec!["Supported: esm (cjs is reserved)".into()],
            Self::UnknownDeploymentHelper { .. } => {
                vec!["Supported: dockerfile, compose, jenkins, github-actions".into()]
            }
            Self::UnknownPackage { .. } => vec![
                "Run 'nodeforge --help' and open 'Packages' to see the catalog".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{field}'")]
            }
            _ => vec!["This appears to be a bug in nodeforge, please report it".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::OrphanedArtifact { .. }
            | Self::InvalidAmendment { .. } => ErrorCategory::Internal,
            Self::UnsupportedModuleSystem { .. } => ErrorCategory::Unsupported,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Unsupported,
    Internal,
}
