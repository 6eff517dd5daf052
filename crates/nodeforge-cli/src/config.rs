//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `NODEFORGE__<SECTION>__<KEY>`
//! 3. Config file: `--config FILE`, else the platform config path
//! 4. Built-in defaults (`Default` impls, applied per missing key)

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use nodeforge_adapters::PackageManagerKind;
use nodeforge_core::domain::{
    ApiVersion, DeploymentHelper, LanguageVariant, PackageName, Port, packages,
};

const ENV_PREFIX: &str = "NODEFORGE";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Answers used when a flag is absent (and as prompt defaults).
    pub defaults: Defaults,
    /// Dependency installation.
    pub install: InstallConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub language: LanguageVariant,
    pub port: Port,
    pub api_version: ApiVersion,
    pub packages: BTreeSet<PackageName>,
    pub deployment: BTreeSet<DeploymentHelper>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallConfig {
    pub package_manager: PackageManagerKind,
    pub skip: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            language: LanguageVariant::TypeScript,
            port: Port::DEFAULT,
            api_version: ApiVersion::default(),
            packages: packages::default_packages(),
            deployment: BTreeSet::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the TOML file, then environment.
    ///
    /// An explicit `config_file` must exist; the platform default is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let env = env
            .prefix_separator(ENV_SEPARATOR)
            .separator(ENV_SEPARATOR)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("defaults.packages")
            .with_list_parse_key("defaults.deployment");

        // Keys absent from every source fall back to the serde defaults.
        Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(env)
            .build()
            .and_then(Config::try_deserialize)
            .with_context(|| format!("failed to load configuration (file: {})", path.display()))
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.nodeforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "nodeforge", "nodeforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".nodeforge.toml"))
    }

    /// The configuration rendered as TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render configuration as TOML")
    }
}
