//! The `ProjectConfig` aggregate root and its typestate builder.
//!
//! A `ProjectConfig` is the normalized, validated description of the project
//! the user wants to generate. Once one exists it is guaranteed consistent:
//! the name is filesystem-safe, the port is in range, every package is in the
//! catalog and the module system is one the generator accepts.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoName` / `HasName`) to
//! enforce at *compile time* that a project name is set before anything
//! else. `build()` re-runs [`ProjectConfig::validate`] for the cross-field
//! rules.
//!
//! # Domain purity
//!
//! This module must not import `tracing`.

use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

use crate::domain::{
    error::DomainError,
    value_objects::{
        ApiVersion, DeploymentHelper, LanguageVariant, ModuleSystem, PackageName, Port,
        ProjectName,
    },
    variant::{VariantKey, select_variant},
};

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    name: ProjectName,
    language: LanguageVariant,
    module_system: ModuleSystem,
    packages: BTreeSet<PackageName>,
    port: Port,
    deployment: BTreeSet<DeploymentHelper>,
    api_version: ApiVersion,
}

impl ProjectConfig {
    /// Start building a new `ProjectConfig`.
    pub fn builder() -> ProjectConfigBuilder<NoName> {
        ProjectConfigBuilder::new()
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }
    pub const fn language(&self) -> LanguageVariant {
        self.language
    }
    pub const fn module_system(&self) -> ModuleSystem {
        self.module_system
    }
    pub fn packages(&self) -> &BTreeSet<PackageName> {
        &self.packages
    }
    pub const fn port(&self) -> Port {
        self.port
    }
    pub fn deployment(&self) -> &BTreeSet<DeploymentHelper> {
        &self.deployment
    }
    pub fn wants(&self, helper: DeploymentHelper) -> bool {
        self.deployment.contains(&helper)
    }
    pub fn api_version(&self) -> &ApiVersion {
        &self.api_version
    }

    /// The variant key every artifact of this project is rendered with.
    pub const fn variant(&self) -> VariantKey {
        select_variant(self.language, self.module_system)
    }

    /// Same configuration under a different name.
    ///
    /// Used when the user resolves a name conflict by renaming; nothing else
    /// about the request changes.
    pub fn renamed(&self, name: ProjectName) -> Self {
        Self {
            name,
            ..self.clone()
        }
    }

    /// Validate internal consistency.
    ///
    /// Called automatically by the builder. Available for re-validation after
    /// deserialization or external construction.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.module_system.is_enabled() {
            return Err(DomainError::UnsupportedModuleSystem {
                module_system: self.module_system.display_name().to_string(),
            });
        }
        Ok(())
    }

    /// Bypass the module-system gate so planner tests can exercise the
    /// CommonJS templates end to end.
    #[cfg(test)]
    pub(crate) fn with_module_system_unchecked(mut self, module_system: ModuleSystem) -> Self {
        self.module_system = module_system;
        self
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {}, port {})",
            self.name,
            self.language.display_name(),
            self.module_system.display_name(),
            self.port
        )
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: name has not yet been set.
#[derive(Debug)]
pub struct NoName;
/// Marker: name has been set; other fields may now be configured.
#[derive(Debug)]
pub struct HasName;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`ProjectConfig`].
#[derive(Debug)]
pub struct ProjectConfigBuilder<N> {
    name: Option<ProjectName>,
    language: LanguageVariant,
    module_system: ModuleSystem,
    packages: BTreeSet<PackageName>,
    port: Port,
    deployment: BTreeSet<DeploymentHelper>,
    api_version: ApiVersion,
    _marker: PhantomData<N>,
}

impl ProjectConfigBuilder<NoName> {
    pub fn new() -> Self {
        Self {
            name: None,
            language: LanguageVariant::TypeScript,
            module_system: ModuleSystem::EsModules,
            packages: BTreeSet::new(),
            port: Port::DEFAULT,
            deployment: BTreeSet::new(),
            api_version: ApiVersion::default(),
            _marker: PhantomData,
        }
    }

    /// Set the project name. This transitions the builder to `HasName`.
    pub fn name(self, name: ProjectName) -> ProjectConfigBuilder<HasName> {
        ProjectConfigBuilder {
            name: Some(name),
            language: self.language,
            module_system: self.module_system,
            packages: self.packages,
            port: self.port,
            deployment: self.deployment,
            api_version: self.api_version,
            _marker: PhantomData,
        }
    }
}

impl Default for ProjectConfigBuilder<NoName> {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectConfigBuilder<HasName> {
    pub fn language(mut self, language: LanguageVariant) -> Self {
        self.language = language;
        self
    }

    /// Set the module system.
    ///
    /// Rejects immediately if the module system is not enabled, so the
    /// variant selector never sees a pair it cannot generate.
    pub fn module_system(mut self, module_system: ModuleSystem) -> Result<Self, DomainError> {
        if !module_system.is_enabled() {
            return Err(DomainError::UnsupportedModuleSystem {
                module_system: module_system.display_name().to_string(),
            });
        }
        self.module_system = module_system;
        Ok(self)
    }

    /// Add one package. Duplicates collapse.
    pub fn package(mut self, package: PackageName) -> Self {
        self.packages.insert(package);
        self
    }

    pub fn packages(mut self, packages: impl IntoIterator<Item = PackageName>) -> Self {
        self.packages.extend(packages);
        self
    }

    pub fn port(mut self, port: Port) -> Self {
        self.port = port;
        self
    }

    pub fn deployment(mut self, helper: DeploymentHelper) -> Self {
        self.deployment.insert(helper);
        self
    }

    pub fn deployments(mut self, helpers: impl IntoIterator<Item = DeploymentHelper>) -> Self {
        self.deployment.extend(helpers);
        self
    }

    pub fn api_version(mut self, api_version: ApiVersion) -> Self {
        self.api_version = api_version;
        self
    }

    /// Build and validate the `ProjectConfig`.
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let name = self
            .name
            .ok_or(DomainError::MissingRequiredField { field: "name" })?;

        let config = ProjectConfig {
            name,
            language: self.language,
            module_system: self.module_system,
            packages: self.packages,
            port: self.port,
            deployment: self.deployment,
            api_version: self.api_version,
        };

        config.validate()?;
        Ok(config)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
