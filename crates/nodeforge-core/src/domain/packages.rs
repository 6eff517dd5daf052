//! Package catalog registry.
//!
//! # Design Rationale
//!
//! Every package the prompt can offer is described exactly once by a
//! [`PackageDef`]. Validation, default selection and the `@types/` companion
//! used by TypeScript projects all derive from this table.
//!
//! # Adding a New Package
//!
//! 1. Add one [`PackageDef`] entry to [`PACKAGE_REGISTRY`]
//! 2. Nothing else changes

use std::collections::BTreeSet;

use crate::domain::value_objects::PackageName;

/// Describes one installable package.
#[derive(Debug, Clone, Copy)]
pub struct PackageDef {
    /// npm package name, always lowercase.
    pub name: &'static str,

    /// One-line description shown in the selection prompt.
    pub description: &'static str,

    /// Pre-checked in the interactive multi-select.
    pub default_selected: bool,

    /// Type declarations installed as a dev dependency for TypeScript.
    pub types_package: Option<&'static str>,
}

/// Single source of truth for recognised packages.
pub static PACKAGE_REGISTRY: &[PackageDef] = &[
    PackageDef {
        name: "express",
        description: "Minimal web framework",
        default_selected: true,
        types_package: Some("@types/express"),
    },
    PackageDef {
        name: "dotenv",
        description: "Load environment variables from .env",
        default_selected: true,
        types_package: None,
    },
    PackageDef {
        name: "mongoose",
        description: "MongoDB object modelling",
        default_selected: true,
        types_package: None,
    },
    PackageDef {
        name: "winston",
        description: "Structured logging",
        default_selected: true,
        types_package: None,
    },
    PackageDef {
        name: "uuid",
        description: "RFC 4122 identifiers for transaction ids",
        default_selected: true,
        types_package: Some("@types/uuid"),
    },
    PackageDef {
        name: "swagger-jsdoc",
        description: "OpenAPI spec from JSDoc comments",
        default_selected: true,
        types_package: Some("@types/swagger-jsdoc"),
    },
    PackageDef {
        name: "swagger-ui-express",
        description: "Serve Swagger UI",
        default_selected: true,
        types_package: Some("@types/swagger-ui-express"),
    },
    PackageDef {
        name: "cors",
        description: "Cross-origin resource sharing middleware",
        default_selected: false,
        types_package: Some("@types/cors"),
    },
    PackageDef {
        name: "helmet",
        description: "Security-related HTTP headers",
        default_selected: false,
        types_package: None,
    },
    PackageDef {
        name: "morgan",
        description: "HTTP request logger",
        default_selected: false,
        types_package: Some("@types/morgan"),
    },
    PackageDef {
        name: "jsonwebtoken",
        description: "JSON Web Tokens",
        default_selected: false,
        types_package: Some("@types/jsonwebtoken"),
    },
    PackageDef {
        name: "bcryptjs",
        description: "Password hashing",
        default_selected: false,
        types_package: Some("@types/bcryptjs"),
    },
    PackageDef {
        name: "joi",
        description: "Schema validation",
        default_selected: false,
        types_package: None,
    },
    PackageDef {
        name: "axios",
        description: "HTTP client",
        default_selected: false,
        types_package: None,
    },
    PackageDef {
        name: "compression",
        description: "Response compression middleware",
        default_selected: false,
        types_package: Some("@types/compression"),
    },
    PackageDef {
        name: "cookie-parser",
        description: "Cookie parsing middleware",
        default_selected: false,
        types_package: Some("@types/cookie-parser"),
    },
];

/// Packages imported by the generated sources themselves.
///
/// The install plan always includes these so that every import in the
/// catalog output resolves, whatever the user selected.
pub static REQUIRED_PACKAGES: &[&str] = &[
    "express",
    "dotenv",
    "mongoose",
    "winston",
    "uuid",
    "swagger-jsdoc",
    "swagger-ui-express",
];

/// Dev tooling for TypeScript projects.
pub static TYPESCRIPT_DEV_PACKAGES: &[&str] = &["typescript", "ts-node", "@types/node"];

/// Dev tooling for JavaScript projects.
pub static JAVASCRIPT_DEV_PACKAGES: &[&str] = &["nodemon"];

/// Look up a package definition by exact (lowercase) name.
pub fn find_package(name: &str) -> Option<&'static PackageDef> {
    PACKAGE_REGISTRY.iter().find(|def| def.name == name)
}

/// Every catalog entry as a validated name.
pub fn all_packages() -> impl Iterator<Item = PackageName> {
    PACKAGE_REGISTRY
        .iter()
        .map(|def| PackageName::from_catalog(def.name))
}

/// Packages pre-selected in the interactive prompt.
pub fn default_packages() -> BTreeSet<PackageName> {
    PACKAGE_REGISTRY
        .iter()
        .filter(|def| def.default_selected)
        .map(|def| PackageName::from_catalog(def.name))
        .collect()
}

/// The packages required by generated code, as validated names.
pub fn required_packages() -> BTreeSet<PackageName> {
    REQUIRED_PACKAGES
        .iter()
        .filter_map(|name| find_package(name))
        .map(|def| PackageName::from_catalog(def.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_names_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for def in PACKAGE_REGISTRY {
            assert!(seen.insert(def.name), "duplicate entry: {}", def.name);
            assert_eq!(def.name, def.name.to_ascii_lowercase());
        }
    }

    #[test]
    fn required_packages_are_all_in_registry() {
        for name in REQUIRED_PACKAGES {
            assert!(find_package(name).is_some(), "missing: {name}");
        }
        assert_eq!(required_packages().len(), REQUIRED_PACKAGES.len());
    }

    #[test]
    fn defaults_include_express_and_dotenv() {
        let defaults = default_packages();
        assert!(defaults.iter().any(|p| p.as_str() == "express"));
        assert!(defaults.iter().any(|p| p.as_str() == "dotenv"));
        assert!(!defaults.iter().any(|p| p.as_str() == "axios"));
    }

    #[test]
    fn types_companions_are_scoped() {
        for def in PACKAGE_REGISTRY {
            if let Some(types) = def.types_package {
                assert!(types.starts_with("@types/"), "{types}");
            }
        }
    }
}
