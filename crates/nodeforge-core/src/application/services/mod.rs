//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate a project".

pub mod emitter;
pub mod generate_service;

pub use emitter::{Emitter, GenerationReport};
pub use generate_service::GenerateService;
