// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for nodeforge.
//!
//! This module contains the pure generation logic: configuration model,
//! variant selection, template catalog and composition planning. All I/O is
//! handled via ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No I/O**: No filesystem, process or terminal access
//! - **No logging**: `tracing` is only used from the application layer up
//! - **Immutable entities**: All domain objects are Clone + PartialEq
//! - **Deterministic**: the same `ProjectConfig` always yields the same plan
//!
// Public API - what the world sees
pub mod catalog;
pub mod entities;
pub mod error;
pub mod packages;
pub mod planner;
pub mod value_objects;
pub mod variant;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    common::RelativePath,
    config::{HasName, NoName, ProjectConfig, ProjectConfigBuilder},
    placement::{Confirmation, ConfirmedProject, ConflictResolution, NameConflict, Placement},
    plan::{
        ArtifactContent, ArtifactSpec, CompositionPlan, DependencyKind, InstallStep, PlanStep,
        merge_patch,
    },
};

pub use catalog::{ArtifactKind, ModuleSyntax, RenderParams, TemplateCatalog};
pub use error::{DomainError, ErrorCategory};
pub use packages::{PACKAGE_REGISTRY, PackageDef};
pub use planner::CompositionPlanner;
pub use validation::DomainValidator;
pub use value_objects::{
    ApiVersion, DeploymentHelper, LanguageVariant, ModuleSystem, PackageName, Port, ProjectName,
};
pub use variant::{ImportSuffix, LaunchCommands, VariantKey, select_variant};
