//! Variant selection.
//!
//! A [`VariantKey`] names the syntactic flavour every generated source must
//! follow. It is derived from `(LanguageVariant, ModuleSystem)` in exactly one
//! place, [`select_variant`]; everything downstream branches on the key and
//! never on the raw configuration fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{LanguageVariant, ModuleSystem};

/// Closed set of language × module-system combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantKey {
    TsEsm,
    TsCjs,
    JsEsm,
    JsCjs,
}

/// Select the variant key for a language and module system.
///
/// Total: the configuration boundary has already rejected anything that
/// cannot be generated, so every pair maps to a key.
pub const fn select_variant(language: LanguageVariant, module_system: ModuleSystem) -> VariantKey {
    match (language, module_system) {
        (LanguageVariant::TypeScript, ModuleSystem::EsModules) => VariantKey::TsEsm,
        (LanguageVariant::TypeScript, ModuleSystem::CommonJs) => VariantKey::TsCjs,
        (LanguageVariant::JavaScript, ModuleSystem::EsModules) => VariantKey::JsEsm,
        (LanguageVariant::JavaScript, ModuleSystem::CommonJs) => VariantKey::JsCjs,
    }
}

/// Whether relative imports carry an explicit file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImportSuffix {
    /// `./routes/health.js`: required by Node's ESM resolver, including for
    /// TypeScript sources compiled under `NodeNext`.
    Explicit(&'static str),
    /// `./routes/health`: CommonJS resolution fills in the extension.
    Bare,
}

impl ImportSuffix {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit(ext) => ext,
            Self::Bare => "",
        }
    }
}

/// `package.json` scripts for one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchCommands {
    pub start: &'static str,
    pub dev: &'static str,
    pub build: Option<&'static str>,
}

impl VariantKey {
    pub const ALL: [Self; 4] = [Self::TsEsm, Self::TsCjs, Self::JsEsm, Self::JsCjs];

    pub const fn language(&self) -> LanguageVariant {
        match self {
            Self::TsEsm | Self::TsCjs => LanguageVariant::TypeScript,
            Self::JsEsm | Self::JsCjs => LanguageVariant::JavaScript,
        }
    }

    pub const fn module_system(&self) -> ModuleSystem {
        match self {
            Self::TsEsm | Self::JsEsm => ModuleSystem::EsModules,
            Self::TsCjs | Self::JsCjs => ModuleSystem::CommonJs,
        }
    }

    pub const fn is_typescript(&self) -> bool {
        matches!(self, Self::TsEsm | Self::TsCjs)
    }

    pub const fn is_esm(&self) -> bool {
        matches!(self, Self::TsEsm | Self::JsEsm)
    }

    /// Extension of generated source files, without the dot.
    pub const fn source_extension(&self) -> &'static str {
        if self.is_typescript() { "ts" } else { "js" }
    }

    pub const fn import_suffix(&self) -> ImportSuffix {
        if self.is_esm() {
            ImportSuffix::Explicit(".js")
        } else {
            ImportSuffix::Bare
        }
    }

    /// Value of the manifest `type` field.
    pub const fn manifest_type(&self) -> &'static str {
        if self.is_esm() { "module" } else { "commonjs" }
    }

    pub const fn launch_commands(&self) -> LaunchCommands {
        match self {
            Self::TsEsm => LaunchCommands {
                start: "node dist/server.js",
                dev: "node --loader ts-node/esm src/server.ts",
                build: Some("tsc"),
            },
            Self::TsCjs => LaunchCommands {
                start: "node dist/server.js",
                dev: "ts-node src/server.ts",
                build: Some("tsc"),
            },
            Self::JsEsm | Self::JsCjs => LaunchCommands {
                start: "node src/server.js",
                dev: "nodemon src/server.js",
                build: None,
            },
        }
    }

    /// Entry point recorded as the manifest `main` field.
    pub const fn main_entry(&self) -> &'static str {
        if self.is_typescript() {
            "dist/server.js"
        } else {
            "src/server.js"
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TsEsm => "TS_ESM",
            Self::TsCjs => "TS_CJS",
            Self::JsEsm => "JS_ESM",
            Self::JsCjs => "JS_CJS",
        }
    }
}

impl fmt::Display for VariantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
