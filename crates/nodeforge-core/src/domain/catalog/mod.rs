//! Template catalog.
//!
//! Every generated file body comes from a pure renderer in this module.
//! Renderers are keyed by [`VariantKey`] (through [`ModuleSyntax`]) and a
//! [`RenderParams`] record; they never see the raw configuration, so the
//! package selection or deployment choices cannot leak into source code.
//!
//! # Adding a New Source Artifact
//!
//! 1. Add a variant to [`ArtifactKind`] and its stem in [`ArtifactKind::stem`]
//! 2. Add a renderer to `sources.rs` covering all four variant keys
//! 3. Add the arm to [`TemplateCatalog::render`]

mod deployment;
mod project_files;
mod sources;
pub mod syntax;

use std::fmt;

use crate::domain::{
    entities::config::ProjectConfig,
    value_objects::{ApiVersion, Port},
    variant::VariantKey,
};

pub use deployment::{compose, dockerfile, dockerignore, github_actions, jenkinsfile};
pub use project_files::{
    env_file, gitignore, manifest, manifest_amendment, readme, tsconfig,
};
pub use syntax::ModuleSyntax;

/// The nine source files every project contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ArtifactKind {
    Logger,
    DatabaseConnector,
    SwaggerSetup,
    TransactionId,
    RequestLogger,
    ErrorHandler,
    HealthRoute,
    AppEntry,
    ServerEntry,
}

impl ArtifactKind {
    /// Emission order: leaves first, entry points last.
    pub const ALL: [Self; 9] = [
        Self::Logger,
        Self::DatabaseConnector,
        Self::SwaggerSetup,
        Self::TransactionId,
        Self::RequestLogger,
        Self::ErrorHandler,
        Self::HealthRoute,
        Self::AppEntry,
        Self::ServerEntry,
    ];

    /// Project-relative path without extension.
    pub const fn stem(&self) -> &'static str {
        match self {
            Self::Logger => "src/utils/logger",
            Self::DatabaseConnector => "src/config/database",
            Self::SwaggerSetup => "src/config/swagger",
            Self::TransactionId => "src/middleware/transactionId",
            Self::RequestLogger => "src/middleware/requestLogger",
            Self::ErrorHandler => "src/middleware/errorHandler",
            Self::HealthRoute => "src/routes/health",
            Self::AppEntry => "src/app",
            Self::ServerEntry => "src/server",
        }
    }

    pub fn path(&self, key: VariantKey) -> String {
        format!("{}.{}", self.stem(), key.source_extension())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stem())
    }
}

/// Values interpolated into templates. Nothing else reaches a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderParams {
    /// Name as typed, used for titles.
    pub project_name: String,
    /// Lowercase name used for npm, database and container names.
    pub package_name: String,
    pub port: Port,
    pub api_version: ApiVersion,
}

impl RenderParams {
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            project_name: config.name().as_str().to_string(),
            package_name: config.name().package_name(),
            port: config.port(),
            api_version: config.api_version().clone(),
        }
    }
}

pub struct TemplateCatalog;

impl TemplateCatalog {
    /// Render one source artifact.
    pub fn render(kind: ArtifactKind, syntax: &ModuleSyntax, params: &RenderParams) -> String {
        match kind {
            ArtifactKind::Logger => sources::logger(syntax, params),
            ArtifactKind::DatabaseConnector => sources::database(syntax, params),
            ArtifactKind::SwaggerSetup => sources::swagger(syntax, params),
            ArtifactKind::TransactionId => sources::transaction_id(syntax),
            ArtifactKind::RequestLogger => sources::request_logger(syntax),
            ArtifactKind::ErrorHandler => sources::error_handler(syntax),
            ArtifactKind::HealthRoute => sources::health_route(syntax),
            ArtifactKind::AppEntry => sources::app_entry(syntax),
            ArtifactKind::ServerEntry => sources::server_entry(syntax, params),
        }
    }
}

/// Line accumulator used by the renderers.
///
/// Plain `&str` lines avoid escaping the braces of the generated code.
#[derive(Default)]
pub(crate) struct Lines(String);

impl Lines {
    pub(crate) fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.0.push_str(text.as_ref());
        self.0.push('\n');
        self
    }

    pub(crate) fn lines(&mut self, text: &[&str]) -> &mut Self {
        for line in text {
            self.line(line);
        }
        self
    }

    pub(crate) fn maybe(&mut self, text: Option<impl AsRef<str>>) -> &mut Self {
        if let Some(text) = text {
            self.line(text);
        }
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.0.push('\n');
        self
    }

    pub(crate) fn finish(&mut self) -> String {
        std::mem::take(&mut self.0)
    }
}
