//! Integration tests for the nodeforge binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// The binary, run inside `dir` with a private config home and no colour.
fn nodeforge(dir: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("nodeforge");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn manifest(root: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(root.join("package.json")).unwrap()).unwrap()
}

#[test]
fn version_prints_descriptor() {
    let temp = TempDir::new().unwrap();
    for flag in ["--version", "-v"] {
        nodeforge(temp.path())
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(format!(
                "nodeforge {}",
                env!("CARGO_PKG_VERSION")
            )))
            .stdout(predicate::str::contains("Authors:"));
    }
}

#[test]
fn help_without_terminal_prints_every_topic() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Getting started"))
        .stdout(predicate::str::contains("--skip-install"))
        .stdout(predicate::str::contains("swagger-ui-express"))
        .stdout(predicate::str::contains("github-actions"))
        .stdout(predicate::str::contains("[install]"));
}

#[test]
fn dry_run_prints_plan_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .args(["--yes", "--dry-run", "--name", "demo", "--deploy", "dockerfile"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("src/server.ts"))
        .stdout(predicate::str::contains("Dockerfile"))
        .stdout(predicate::str::contains("nothing was written"));

    assert!(!temp.path().join("demo").exists());
}

#[test]
fn generates_javascript_project() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .args([
            "--yes",
            "--skip-install",
            "--name",
            "demo",
            "--lang",
            "js",
            "--port",
            "4000",
            "--deploy",
            "dockerfile",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Project 'demo' created"))
        .stdout(predicate::str::contains("Next steps"))
        .stdout(predicate::str::contains("npm install"));

    let root = temp.path().join("demo");
    let pkg = manifest(&root);
    assert_eq!(pkg["name"], "demo");
    assert_eq!(pkg["type"], "module");
    assert_eq!(pkg["scripts"]["start"], "node src/server.js");
    assert!(pkg["scripts"].get("build").is_none());

    assert!(!root.join("tsconfig.json").exists());
    assert!(root.join("src/app.js").is_file());
    assert!(root.join("src/routes/health.js").is_file());
    let dockerfile = fs::read_to_string(root.join("Dockerfile")).unwrap();
    assert!(dockerfile.contains("EXPOSE 4000"));
    assert!(!dockerfile.contains("npm run build"));
    let env = fs::read_to_string(root.join(".env")).unwrap();
    assert!(env.contains("PORT=4000"));
}

#[test]
fn generates_typescript_project_in_output_dir() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .args([
            "--yes",
            "--skip-install",
            "--name",
            "api",
            "--lang",
            "ts",
            "--output",
            "work",
            "--deploy",
            "compose,github-actions",
        ])
        .assert()
        .success();

    let root = temp.path().join("work/api");
    let pkg = manifest(&root);
    assert_eq!(pkg["scripts"]["dev"], "node --loader ts-node/esm src/server.ts");
    assert_eq!(pkg["scripts"]["build"], "tsc");

    let tsconfig: Value =
        serde_json::from_str(&fs::read_to_string(root.join("tsconfig.json")).unwrap()).unwrap();
    assert_eq!(tsconfig["compilerOptions"]["module"], "NodeNext");

    for path in [
        "src/server.ts",
        "src/app.ts",
        "src/config/database.ts",
        "src/models/.gitkeep",
        "docker-compose.yml",
        ".github/workflows/ci.yml",
        "README.md",
        ".gitignore",
    ] {
        assert!(root.join(path).is_file(), "missing {path}");
    }
    assert!(!root.join("Dockerfile").exists());
    assert!(!root.join("Jenkinsfile").exists());
}

#[test]
fn force_replaces_existing_project() {
    let temp = TempDir::new().unwrap();
    let stale = temp.path().join("demo/stale.txt");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "old").unwrap();

    nodeforge(temp.path())
        .args(["--yes", "--skip-install", "--force", "--name", "demo"])
        .assert()
        .success();

    assert!(!stale.exists());
    assert!(temp.path().join("demo/package.json").is_file());
}

#[test]
fn config_file_supplies_defaults() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("nodeforge.toml");
    fs::write(
        &config,
        "[defaults]\nlanguage = \"js\"\nport = 5000\napi_version = \"v2\"\n\n[install]\nskip = true\n",
    )
    .unwrap();

    nodeforge(temp.path())
        .args(["--yes", "--name", "demo", "--config"])
        .arg(&config)
        .assert()
        .success();

    let root = temp.path().join("demo");
    assert!(root.join("src/server.js").is_file());
    let env = fs::read_to_string(root.join(".env")).unwrap();
    assert!(env.contains("PORT=5000"));
    assert!(env.contains("API_VERSION=v2"));
}

#[test]
fn environment_overrides_config() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .env("NODEFORGE__DEFAULTS__PORT", "7000")
        .env("NODEFORGE__INSTALL__SKIP", "true")
        .args(["--yes", "--name", "demo"])
        .assert()
        .success();

    let env = fs::read_to_string(temp.path().join("demo/.env")).unwrap();
    assert!(env.contains("PORT=7000"));
}

#[test]
fn quiet_prints_nothing_on_success() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .args(["--quiet", "--yes", "--skip-install", "--name", "demo"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(temp.path().join("demo/package.json").is_file());
}

#[test]
fn verbose_logs_progress() {
    let temp = TempDir::new().unwrap();
    nodeforge(temp.path())
        .args(["--verbose", "--yes", "--skip-install", "--name", "demo"])
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}
