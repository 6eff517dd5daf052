//! End-to-end generation through the real adapters.

use std::path::Path;
use std::sync::{Arc, Mutex};

use nodeforge_adapters::{LocalFilesystem, MemoryFilesystem, NoopPackageManager};
use nodeforge_core::{
    application::{ApplicationError, GenerateService, ports::PackageManager},
    domain::{
        Confirmation, ConfirmedProject, ConflictResolution, DependencyKind, DeploymentHelper,
        InstallStep, LanguageVariant, ModuleSystem, PackageName, Port, ProjectConfig, ProjectName,
    },
    error::{ForgeError, ForgeResult},
};
use serde_json::Value;

/// Stands in for npm: records calls and writes the dependency table into
/// `package.json` the way a real package manager would.
#[derive(Clone, Default)]
struct FakeNpm {
    calls: Arc<Mutex<Vec<InstallStep>>>,
}

impl PackageManager for FakeNpm {
    fn name(&self) -> String {
        "fake-npm".into()
    }

    fn install(&self, root: &Path, step: &InstallStep) -> ForgeResult<()> {
        self.calls.lock().unwrap().push(step.clone());

        let path = root.join("package.json");
        let mut manifest: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let table = match step.kind {
            DependencyKind::Runtime => "dependencies",
            DependencyKind::Dev => "devDependencies",
        };
        for package in &step.packages {
            manifest[table][package] = Value::from("^1.0.0");
        }
        std::fs::write(&path, serde_json::to_string(&manifest).unwrap()).unwrap();
        Ok(())
    }
}

struct FailingNpm;

impl PackageManager for FailingNpm {
    fn name(&self) -> String {
        "npm".into()
    }

    fn install(&self, _root: &Path, _step: &InstallStep) -> ForgeResult<()> {
        Err(ApplicationError::ExternalToolFailure {
            tool: "npm".into(),
            command: "npm install".into(),
            reason: "registry unreachable".into(),
        }
        .into())
    }
}

fn config(language: LanguageVariant) -> ProjectConfig {
    ProjectConfig::builder()
        .name(ProjectName::parse("demo-app").unwrap())
        .language(language)
        .module_system(ModuleSystem::EsModules)
        .unwrap()
        .packages([
            PackageName::parse("express").unwrap(),
            PackageName::parse("dotenv").unwrap(),
        ])
        .port(Port::new(4000).unwrap())
        .deployments([DeploymentHelper::Dockerfile, DeploymentHelper::GithubActions])
        .build()
        .unwrap()
}

fn confirmed(svc: &GenerateService, config: ProjectConfig, parent: &Path) -> ConfirmedProject {
    match svc.confirm(config, parent).unwrap() {
        Confirmation::Confirmed(project) => project,
        Confirmation::Conflict(_) => panic!("unexpected conflict"),
    }
}

#[test]
fn typescript_project_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let npm = FakeNpm::default();
    let svc = GenerateService::new(Box::new(LocalFilesystem::new()), Box::new(npm.clone()));

    let project = confirmed(&svc, config(LanguageVariant::TypeScript), dir.path());
    let report = svc.generate(&project).unwrap();
    let root = dir.path().join("demo-app");
    assert_eq!(report.root, root);

    let manifest: Value =
        serde_json::from_str(&std::fs::read_to_string(root.join("package.json")).unwrap())
            .unwrap();
    assert_eq!(manifest["type"], "module");
    assert_eq!(manifest["scripts"]["dev"], "node --loader ts-node/esm src/server.ts");
    // Installed tables survive the amendment.
    assert_eq!(manifest["dependencies"]["express"], "^1.0.0");
    assert_eq!(manifest["devDependencies"]["typescript"], "^1.0.0");

    for path in [
        "tsconfig.json",
        ".env",
        ".gitignore",
        "README.md",
        "Dockerfile",
        ".dockerignore",
        ".github/workflows/ci.yml",
        "src/app.ts",
        "src/server.ts",
        "src/routes/health.ts",
        "src/controllers/.gitkeep",
    ] {
        assert!(root.join(path).is_file(), "missing {path}");
    }
    assert!(!root.join("docker-compose.yml").exists());

    let calls = npm.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].kind, DependencyKind::Runtime);
    assert_eq!(calls[1].kind, DependencyKind::Dev);
}

#[test]
fn javascript_project_in_memory() {
    let fs = MemoryFilesystem::new();
    let svc = GenerateService::new(Box::new(fs.clone()), Box::new(NoopPackageManager::new()));

    let project = confirmed(&svc, config(LanguageVariant::JavaScript), Path::new("/work"));
    svc.generate(&project).unwrap();

    let root = Path::new("/work/demo-app");
    assert!(fs.get(&root.join("tsconfig.json")).is_none());
    let app = fs.get(&root.join("src/app.js")).unwrap();
    assert!(app.contains("from './routes/health.js'"));
    let dockerfile = fs.get(&root.join("Dockerfile")).unwrap();
    assert!(!dockerfile.contains("npm run build"));
    assert!(dockerfile.contains("EXPOSE 4000"));

    let manifest: Value = serde_json::from_str(&fs.get(&root.join("package.json")).unwrap()).unwrap();
    assert_eq!(manifest["scripts"]["start"], "node src/server.js");
    assert!(manifest["scripts"].get("build").is_none());
}

#[test]
fn failed_install_rolls_back_directory() {
    let dir = tempfile::tempdir().unwrap();
    let svc = GenerateService::new(Box::new(LocalFilesystem::new()), Box::new(FailingNpm));

    let project = confirmed(&svc, config(LanguageVariant::TypeScript), dir.path());
    let err = svc.generate(&project).unwrap_err();

    assert!(matches!(
        err,
        ForgeError::Application(ApplicationError::ExternalToolFailure { .. })
    ));
    assert!(!dir.path().join("demo-app").exists());
}

#[test]
fn overwrite_replaces_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let stale = dir.path().join("demo-app/stale.txt");
    std::fs::create_dir_all(stale.parent().unwrap()).unwrap();
    std::fs::write(&stale, "old").unwrap();

    let svc = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(NoopPackageManager::new()),
    );
    let Confirmation::Conflict(conflict) = svc
        .confirm(config(LanguageVariant::TypeScript), dir.path())
        .unwrap()
    else {
        panic!("expected conflict");
    };
    let Confirmation::Confirmed(project) = svc
        .resolve(conflict, ConflictResolution::Overwrite)
        .unwrap()
    else {
        panic!("expected confirmation");
    };
    svc.generate(&project).unwrap();

    assert!(!stale.exists());
    assert!(dir.path().join("demo-app/src/server.ts").is_file());
}

#[test]
fn abort_leaves_existing_directory_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let keep = dir.path().join("demo-app/keep.txt");
    std::fs::create_dir_all(keep.parent().unwrap()).unwrap();
    std::fs::write(&keep, "mine").unwrap();

    let svc = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(NoopPackageManager::new()),
    );
    let Confirmation::Conflict(conflict) = svc
        .confirm(config(LanguageVariant::TypeScript), dir.path())
        .unwrap()
    else {
        panic!("expected conflict");
    };
    let err = svc.resolve(conflict, ConflictResolution::Abort).unwrap_err();

    assert!(err.is_interruption());
    assert_eq!(std::fs::read_to_string(&keep).unwrap(), "mine");
}
