//! Application layer for nodeforge.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (GenerateService, Emitter)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod cancel;
pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{Emitter, GenerateService, GenerationReport};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, PackageManager};

pub use cancel::CancelFlag;
pub use error::ApplicationError;
