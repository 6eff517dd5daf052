//! Composition planner: `ProjectConfig` → `CompositionPlan`.
//!
//! The planner decides which artifacts exist and in which order, renders
//! their content through the catalog, and schedules the install steps.
//! It touches no filesystem and is deterministic: the same configuration
//! always yields an equal plan.

use std::collections::BTreeSet;

use crate::domain::{
    catalog::{self, ArtifactKind, ModuleSyntax, RenderParams, TemplateCatalog},
    entities::{
        config::ProjectConfig,
        placement::ConfirmedProject,
        plan::{ArtifactSpec, CompositionPlan, DependencyKind, InstallStep, render_json},
    },
    packages::{self, JAVASCRIPT_DEV_PACKAGES, TYPESCRIPT_DEV_PACKAGES},
    value_objects::{DeploymentHelper, PackageName},
    variant::VariantKey,
};

/// Folders created under `src` for every project.
pub const SOURCE_FOLDERS: [&str; 8] = [
    "controllers",
    "routes",
    "services",
    "models",
    "middleware",
    "utils",
    "types",
    "config",
];

pub const MANIFEST: &str = "package.json";

pub struct CompositionPlanner;

impl CompositionPlanner {
    /// Plan a checked project. This is the entry point used by the
    /// application layer.
    pub fn plan_confirmed(project: &ConfirmedProject) -> CompositionPlan {
        Self::plan(project.config())
    }

    pub fn plan(config: &ProjectConfig) -> CompositionPlan {
        let key = config.variant();
        let syntax = ModuleSyntax::for_key(key);
        let params = RenderParams::from_config(config);
        let mut plan = CompositionPlan::new(key);

        plan.push(ArtifactSpec::directory("src", key));
        for folder in SOURCE_FOLDERS {
            plan.push(ArtifactSpec::directory(format!("src/{folder}").as_str(), key));
        }

        plan.push(ArtifactSpec::file(
            MANIFEST,
            key,
            render_json(&catalog::manifest(&params)),
        ));
        for step in install_steps(config) {
            plan.push_install(step);
        }
        plan.push(ArtifactSpec::json_merge(
            MANIFEST,
            key,
            catalog::manifest_amendment(key),
        ));

        if key.is_typescript() {
            plan.push(ArtifactSpec::file(
                "tsconfig.json",
                key,
                render_json(&catalog::tsconfig(key)),
            ));
        }
        plan.push(ArtifactSpec::file(".env", key, catalog::env_file(&params)));
        plan.push(ArtifactSpec::file(".gitignore", key, catalog::gitignore()));

        for folder in SOURCE_FOLDERS {
            let prefix = format!("src/{folder}/");
            let populated = ArtifactKind::ALL
                .iter()
                .any(|kind| kind.stem().starts_with(&prefix));
            if !populated {
                plan.push(ArtifactSpec::file(
                    format!("{prefix}.gitkeep").as_str(),
                    key,
                    String::new(),
                ));
            }
        }

        for kind in ArtifactKind::ALL {
            plan.push(ArtifactSpec::file(
                kind.path(key).as_str(),
                key,
                TemplateCatalog::render(kind, &syntax, &params),
            ));
        }

        plan.push(ArtifactSpec::file(
            "README.md",
            key,
            catalog::readme(key, &params),
        ));

        push_deployment(&mut plan, config, key, &params);
        plan
    }
}

fn push_deployment(
    plan: &mut CompositionPlan,
    config: &ProjectConfig,
    key: VariantKey,
    params: &RenderParams,
) {
    for helper in config.deployment() {
        match helper {
            DeploymentHelper::Dockerfile => {
                plan.push(ArtifactSpec::file(
                    "Dockerfile",
                    key,
                    catalog::dockerfile(key, params),
                ));
                plan.push(ArtifactSpec::file(
                    ".dockerignore",
                    key,
                    catalog::dockerignore(),
                ));
            }
            DeploymentHelper::Compose => {
                plan.push(ArtifactSpec::file(
                    "docker-compose.yml",
                    key,
                    catalog::compose(params),
                ));
            }
            DeploymentHelper::Jenkins => {
                plan.push(ArtifactSpec::file(
                    "Jenkinsfile",
                    key,
                    catalog::jenkinsfile(key, params),
                ));
            }
            DeploymentHelper::GithubActions => {
                plan.push(ArtifactSpec::directory(".github", key));
                plan.push(ArtifactSpec::directory(".github/workflows", key));
                plan.push(ArtifactSpec::file(
                    ".github/workflows/ci.yml",
                    key,
                    catalog::github_actions(key),
                ));
            }
        }
    }
}

/// Runtime install (user selection ∪ required), then dev tooling.
fn install_steps(config: &ProjectConfig) -> [InstallStep; 2] {
    let runtime: BTreeSet<PackageName> = config
        .packages()
        .iter()
        .copied()
        .chain(packages::required_packages())
        .collect();

    let dev: Vec<String> = if config.variant().is_typescript() {
        TYPESCRIPT_DEV_PACKAGES
            .iter()
            .copied()
            .chain(
                runtime
                    .iter()
                    .filter_map(|name| packages::find_package(name.as_str()))
                    .filter_map(|def| def.types_package),
            )
            .map(str::to_string)
            .collect()
    } else {
        JAVASCRIPT_DEV_PACKAGES.iter().map(|s| s.to_string()).collect()
    };

    [
        InstallStep {
            kind: DependencyKind::Runtime,
            packages: runtime.iter().map(|p| p.as_str().to_string()).collect(),
        },
        InstallStep {
            kind: DependencyKind::Dev,
            packages: dev,
        },
    ]
}
