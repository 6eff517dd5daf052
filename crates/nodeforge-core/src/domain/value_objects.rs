//! Domain value objects: LanguageVariant, ModuleSystem, DeploymentHelper,
//! Port, ProjectName, ApiVersion, PackageName.
//!
//! # Design
//!
//! These are pure value types, equality-by-value, no identity. Every type
//! that wraps user input validates on construction, so once a value exists
//! it is known good. None of them know about variant keys or templates.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm and the `FromStr` arm here
//! 3. Extend `variant::select_variant` if it is a language or module axis

use crate::domain::{error::DomainError, packages};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── LanguageVariant ──────────────────────────────────────────────────────────

/// Source language of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageVariant {
    #[serde(alias = "ts")]
    TypeScript,
    #[serde(alias = "js")]
    JavaScript,
}

impl LanguageVariant {
    pub const ALL: [Self; 2] = [Self::TypeScript, Self::JavaScript];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TypeScript => "typescript",
            Self::JavaScript => "javascript",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
        }
    }
}

impl fmt::Display for LanguageVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "typescript" | "ts" => Ok(Self::TypeScript),
            "javascript" | "js" => Ok(Self::JavaScript),
            other => Err(DomainError::UnknownLanguage {
                value: other.to_string(),
            }),
        }
    }
}

// ── ModuleSystem ─────────────────────────────────────────────────────────────

/// Module system used by the generated sources.
///
/// `CommonJs` is a full member of the model and has templates, but the
/// configuration builder rejects it until it is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleSystem {
    #[serde(alias = "esm")]
    EsModules,
    #[serde(alias = "cjs")]
    CommonJs,
}

impl ModuleSystem {
    pub const ALL: [Self; 2] = [Self::EsModules, Self::CommonJs];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EsModules => "esm",
            Self::CommonJs => "cjs",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::EsModules => "ES Modules",
            Self::CommonJs => "CommonJS",
        }
    }

    /// Whether the configuration boundary accepts this module system.
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::EsModules)
    }
}

impl fmt::Display for ModuleSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "esm" | "es" | "module" | "esmodules" | "es-modules" => Ok(Self::EsModules),
            "cjs" | "commonjs" => Ok(Self::CommonJs),
            other => Err(DomainError::UnknownModuleSystem {
                value: other.to_string(),
            }),
        }
    }
}

// ── DeploymentHelper ─────────────────────────────────────────────────────────

/// Optional deployment descriptor generated next to the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentHelper {
    Dockerfile,
    Compose,
    Jenkins,
    GithubActions,
}

impl DeploymentHelper {
    pub const ALL: [Self; 4] = [
        Self::Dockerfile,
        Self::Compose,
        Self::Jenkins,
        Self::GithubActions,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dockerfile => "dockerfile",
            Self::Compose => "compose",
            Self::Jenkins => "jenkins",
            Self::GithubActions => "github-actions",
        }
    }

    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Dockerfile => "Dockerfile",
            Self::Compose => "Docker Compose",
            Self::Jenkins => "Jenkins pipeline",
            Self::GithubActions => "GitHub Actions workflow",
        }
    }
}

impl fmt::Display for DeploymentHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentHelper {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dockerfile" | "docker" => Ok(Self::Dockerfile),
            "compose" | "docker-compose" => Ok(Self::Compose),
            "jenkins" | "jenkinsfile" => Ok(Self::Jenkins),
            "github-actions" | "github" | "gha" | "actions" => Ok(Self::GithubActions),
            other => Err(DomainError::UnknownDeploymentHelper {
                value: other.to_string(),
            }),
        }
    }
}

// ── Port ─────────────────────────────────────────────────────────────────────

/// A TCP port in `1..=65535`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Port(u16);

impl Port {
    pub const DEFAULT: Port = Port(3000);

    pub fn new(value: u32) -> Result<Self, DomainError> {
        match u16::try_from(value) {
            Ok(p) if p != 0 => Ok(Self(p)),
            _ => Err(DomainError::InvalidPort {
                value: value.to_string(),
            }),
        }
    }

    pub const fn get(&self) -> u16 {
        self.0
    }
}

impl Default for Port {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Port {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: u32 = trimmed.parse().map_err(|_| DomainError::InvalidPort {
            value: trimmed.to_string(),
        })?;
        Self::new(value)
    }
}

impl TryFrom<u32> for Port {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Port> for u32 {
    fn from(port: Port) -> Self {
        u32::from(port.0)
    }
}

// ── ProjectName ──────────────────────────────────────────────────────────────

/// Filesystem-safe project name, also used as the package name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectName(String);

impl ProjectName {
    const MAX_LEN: usize = 214;

    pub fn parse(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = raw.as_ref().trim();
        let reject = |reason: &str| DomainError::InvalidProjectName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        if name.is_empty() {
            return Err(reject("name cannot be empty"));
        }
        if name.len() > Self::MAX_LEN {
            return Err(reject("name is longer than 214 characters"));
        }
        if name.starts_with('.') || name.starts_with('_') {
            return Err(reject("name cannot start with '.' or '_'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(reject("name cannot contain path separators"));
        }
        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(reject(&format!("character '{bad}' is not allowed")));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name written into `package.json` (npm requires lowercase).
    pub fn package_name(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProjectName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProjectName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ProjectName> for String {
    fn from(name: ProjectName) -> Self {
        name.0
    }
}

// ── ApiVersion ───────────────────────────────────────────────────────────────

/// Route prefix version such as `v1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiVersion(String);

impl ApiVersion {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, DomainError> {
        let value = raw.as_ref().trim();
        let valid = value
            .strip_prefix('v')
            .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()));
        if valid {
            Ok(Self(value.to_string()))
        } else {
            Err(DomainError::InvalidApiVersion {
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ApiVersion {
    fn default() -> Self {
        Self("v1".into())
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ApiVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ApiVersion {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ApiVersion> for String {
    fn from(v: ApiVersion) -> Self {
        v.0
    }
}

// ── PackageName ──────────────────────────────────────────────────────────────

/// An npm package drawn from the fixed catalog in [`packages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(&'static str);

impl PackageName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let wanted = raw.trim().to_ascii_lowercase();
        packages::find_package(&wanted)
            .map(|def| Self(def.name))
            .ok_or(DomainError::UnknownPackage { name: wanted })
    }

    /// Construct from a catalog entry. Only the registry calls this.
    pub(crate) const fn from_catalog(name: &'static str) -> Self {
        Self(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl FromStr for PackageName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for PackageName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl<'de> Deserialize<'de> for PackageName {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
