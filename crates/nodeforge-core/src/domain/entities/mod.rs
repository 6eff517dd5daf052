pub mod common;
pub mod config;
pub mod placement;
pub mod plan;

pub use crate::domain::DomainError;
pub use config::ProjectConfig;
pub use plan::CompositionPlan;
