use crate::domain::{
    entities::{CompositionPlan, ProjectConfig},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_config(config: &ProjectConfig) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_plan(plan: &CompositionPlan) -> Result<(), DomainError> {
        plan.validate()
    }
}
