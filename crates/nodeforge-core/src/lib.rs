//! nodeforge core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the nodeforge
//! Node.js backend generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          nodeforge-cli (CLI)            │
//! │   (prompts, help menu, progress)        │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │      (GenerateService, Emitter)         │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Filesystem, PackageManager)        │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   nodeforge-adapters (Infrastructure)   │
//! │ (LocalFilesystem, CommandPackageManager)│
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectConfig, VariantKey, Catalog,    │
//! │  CompositionPlanner)                    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use nodeforge_core::{
//!     application::GenerateService,
//!     domain::{Confirmation, LanguageVariant, ProjectConfig, ProjectName},
//! };
//!
//! // 1. Build a configuration
//! let config = ProjectConfig::builder()
//!     .name(ProjectName::parse("demo-app").unwrap())
//!     .language(LanguageVariant::TypeScript)
//!     .build()
//!     .unwrap();
//!
//! // 2. Check the target directory, then generate
//! let service = GenerateService::new(filesystem, package_manager);
//! if let Confirmation::Confirmed(project) = service.confirm(config, "./").unwrap() {
//!     service.generate(&project).unwrap();
//! }
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CancelFlag, GenerateService, GenerationReport,
        ports::{Filesystem, PackageManager},
    };
    pub use crate::domain::{
        CompositionPlan, Confirmation, ConfirmedProject, ConflictResolution, DeploymentHelper,
        InstallStep, LanguageVariant, ModuleSystem, NameConflict, PackageName, Port,
        ProjectConfig, ProjectName, VariantKey,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
