//! Integration tests for nodeforge-core: configuration to plan.

use std::str::FromStr;

use nodeforge_core::domain::{
    ArtifactKind, CompositionPlanner, DeploymentHelper, DependencyKind, LanguageVariant,
    ModuleSyntax, ModuleSystem, PackageName, PlanStep, Port, ProjectConfig, ProjectName,
    RenderParams, TemplateCatalog, VariantKey, merge_patch,
};
use serde_json::{Value, json};

fn project(language: LanguageVariant, packages: &[&str]) -> ProjectConfig {
    ProjectConfig::builder()
        .name(ProjectName::parse("Orders-API").unwrap())
        .language(language)
        .packages(packages.iter().map(|p| PackageName::parse(p).unwrap()))
        .port(Port::from_str("8080").unwrap())
        .deployment(DeploymentHelper::Compose)
        .build()
        .unwrap()
}

fn position(plan_steps: &[PlanStep], wanted: impl Fn(&PlanStep) -> bool) -> usize {
    plan_steps.iter().position(wanted).unwrap()
}

#[test]
fn plan_is_deterministic() {
    let config = project(LanguageVariant::TypeScript, &["cors", "helmet"]);
    assert_eq!(CompositionPlanner::plan(&config), CompositionPlanner::plan(&config));
}

#[test]
fn manifest_then_installs_then_amendment() {
    let plan = CompositionPlanner::plan(&project(LanguageVariant::TypeScript, &[]));
    let steps = plan.steps();

    let written = position(steps, |s| {
        matches!(s, PlanStep::Emit(a) if a.path.as_str() == "package.json" && a.text().is_some())
    });
    let runtime = position(steps, |s| {
        matches!(s, PlanStep::Install(i) if i.kind == DependencyKind::Runtime)
    });
    let dev = position(steps, |s| {
        matches!(s, PlanStep::Install(i) if i.kind == DependencyKind::Dev)
    });
    let amended = position(steps, |s| {
        matches!(s, PlanStep::Emit(a) if a.path.as_str() == "package.json" && a.patch().is_some())
    });

    assert!(written < runtime && runtime < dev && dev < amended);
    plan.validate().unwrap();
}

#[test]
fn required_packages_are_always_installed() {
    let plan = CompositionPlanner::plan(&project(LanguageVariant::JavaScript, &["cors"]));
    let runtime = plan
        .install_steps()
        .find(|s| s.kind == DependencyKind::Runtime)
        .unwrap();
    for name in ["cors", "express", "mongoose", "winston"] {
        assert!(runtime.packages.iter().any(|p| p == name), "{name}");
    }

    let dev = plan
        .install_steps()
        .find(|s| s.kind == DependencyKind::Dev)
        .unwrap();
    assert_eq!(dev.packages, vec!["nodemon".to_string()]);
}

#[test]
fn typescript_installs_type_packages_for_selection() {
    let plan = CompositionPlanner::plan(&project(LanguageVariant::TypeScript, &["cors"]));
    let dev = plan
        .install_steps()
        .find(|s| s.kind == DependencyKind::Dev)
        .unwrap();
    assert!(dev.packages.iter().any(|p| p == "typescript"));
    assert!(dev.packages.iter().any(|p| p == "@types/cors"));
    assert!(dev.packages.iter().any(|p| p == "@types/express"));
}

#[test]
fn lowercase_name_flows_into_generated_files() {
    let plan = CompositionPlanner::plan(&project(LanguageVariant::JavaScript, &[]));

    let manifest: Value =
        serde_json::from_str(plan.artifact("package.json").unwrap().text().unwrap()).unwrap();
    assert_eq!(manifest["name"], "orders-api");

    let env = plan.artifact(".env").unwrap().text().unwrap();
    assert!(env.contains("PORT=8080"));
    assert!(env.contains("DB_URI=mongodb://localhost:27017/orders-api"));

    let compose = plan.artifact("docker-compose.yml").unwrap().text().unwrap();
    assert!(compose.contains("orders-api"));
    assert!(compose.contains("8080"));

    let readme = plan.artifact("README.md").unwrap().text().unwrap();
    assert!(readme.contains("Orders-API"));
}

#[test]
fn commonjs_sources_render_for_both_languages() {
    let config = project(LanguageVariant::JavaScript, &[]);
    let params = RenderParams::from_config(&config);

    let js = TemplateCatalog::render(
        ArtifactKind::ServerEntry,
        &ModuleSyntax::for_key(VariantKey::JsCjs),
        &params,
    );
    assert!(js.contains("require('./app')"));
    assert!(!js.contains("import "));

    let ts = TemplateCatalog::render(
        ArtifactKind::ServerEntry,
        &ModuleSyntax::for_key(VariantKey::TsCjs),
        &params,
    );
    assert!(ts.contains("import "));
    assert!(!ts.contains("./app.js"));
}

#[test]
fn esm_javascript_imports_carry_extension() {
    let config = project(LanguageVariant::JavaScript, &[]);
    let params = RenderParams::from_config(&config);
    let app = TemplateCatalog::render(
        ArtifactKind::AppEntry,
        &ModuleSyntax::for_key(VariantKey::JsEsm),
        &params,
    );
    assert!(app.contains(".js'"));
    assert!(!app.contains("require("));
}

#[test]
fn commonjs_is_rejected_when_building() {
    let err = ProjectConfig::builder()
        .name(ProjectName::parse("demo").unwrap())
        .module_system(ModuleSystem::CommonJs)
        .unwrap_err();
    assert!(err.to_string().contains("not supported yet"));
}

#[test]
fn merge_patch_keeps_installed_dependencies() {
    let mut manifest = json!({
        "name": "demo",
        "scripts": { "test": "exit 0" },
        "dependencies": { "express": "^4.21.0" }
    });
    merge_patch(
        &mut manifest,
        &json!({ "type": "module", "scripts": { "start": "node src/server.js" } }),
    );

    assert_eq!(manifest["type"], "module");
    assert_eq!(manifest["scripts"]["test"], "exit 0");
    assert_eq!(manifest["scripts"]["start"], "node src/server.js");
    assert_eq!(manifest["dependencies"]["express"], "^4.21.0");
}

#[test]
fn plan_steps_display_for_dry_runs() {
    let plan = CompositionPlanner::plan(&project(LanguageVariant::TypeScript, &[]));
    let lines: Vec<String> = plan.steps().iter().map(ToString::to_string).collect();
    assert!(lines.iter().any(|l| l == "create  src/"));
    assert!(lines.iter().any(|l| l == "write   src/server.ts"));
    assert!(lines.iter().any(|l| l == "amend   package.json"));
    assert!(lines.iter().any(|l| l.starts_with("install ") && l.ends_with("(devDependencies)")));
}
