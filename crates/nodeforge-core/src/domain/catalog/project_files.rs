//! Manifest, compiler configuration and the small project-level files.

use serde_json::{Map, Value, json};

use super::{Lines, RenderParams};
use crate::domain::variant::VariantKey;

const TEST_SCRIPT: &str = "echo \"No tests yet\" && exit 0";

/// Initial `package.json`, written before any install step runs.
pub fn manifest(p: &RenderParams) -> Value {
    json!({
        "name": p.package_name,
        "version": "1.0.0",
        "description": format!("{} backend service", p.project_name),
        "license": "ISC",
    })
}

/// Merge patch applied to `package.json` after installation.
pub fn manifest_amendment(key: VariantKey) -> Value {
    let launch = key.launch_commands();
    let mut scripts = Map::new();
    scripts.insert("start".into(), launch.start.into());
    scripts.insert("dev".into(), launch.dev.into());
    if let Some(build) = launch.build {
        scripts.insert("build".into(), build.into());
    }
    scripts.insert("test".into(), TEST_SCRIPT.into());

    json!({
        "type": key.manifest_type(),
        "main": key.main_entry(),
        "scripts": scripts,
    })
}

/// `tsconfig.json`; only planned for TypeScript keys.
pub fn tsconfig(key: VariantKey) -> Value {
    let (module, resolution) = if key.is_esm() {
        ("NodeNext", "NodeNext")
    } else {
        ("CommonJS", "Node")
    };
    json!({
        "compilerOptions": {
            "target": "ES2020",
            "module": module,
            "moduleResolution": resolution,
            "outDir": "dist",
            "rootDir": "src",
            "strict": true,
            "esModuleInterop": true,
            "skipLibCheck": true,
            "forceConsistentCasingInFileNames": true,
            "resolveJsonModule": true,
        },
        "include": ["src/**/*"],
        "exclude": ["node_modules", "dist"],
    })
}

pub fn env_file(p: &RenderParams) -> String {
    Lines::default()
        .line(format!("PORT={}", p.port))
        .line(format!("DB_URI=mongodb://localhost:27017/{}", p.package_name))
        .line(format!("API_VERSION={}", p.api_version))
        .finish()
}

pub fn gitignore() -> String {
    Lines::default()
        .lines(&[
            "node_modules/",
            "dist/",
            "coverage/",
            ".env",
            "*.log",
            ".DS_Store",
        ])
        .finish()
}

pub fn readme(key: VariantKey, p: &RenderParams) -> String {
    let launch = key.launch_commands();
    let mut out = Lines::default();
    out.line(format!("# {}", p.project_name))
        .blank()
        .line(format!(
            "Express backend written in {} ({}).",
            key.language().display_name(),
            key.module_system().display_name()
        ))
        .blank()
        .line("## Scripts")
        .blank()
        .line(format!("- `npm run dev`: {}", launch.dev))
        .line(format!("- `npm start`: {}", launch.start));
    if let Some(build) = launch.build {
        out.line(format!("- `npm run build`: {build}"));
    }
    out.blank()
        .line("## Endpoints")
        .blank()
        .line(format!(
            "- `GET http://localhost:{}/api/{}/health`",
            p.port, p.api_version
        ))
        .line(format!("- `GET http://localhost:{}/api-docs`", p.port))
        .blank()
        .line("## Environment")
        .blank()
        .line("Copy `.env` and adjust `PORT`, `DB_URI` and `API_VERSION`.")
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ApiVersion, Port};

    fn params() -> RenderParams {
        RenderParams {
            project_name: "Demo".into(),
            package_name: "demo".into(),
            port: Port::new(4000).unwrap(),
            api_version: ApiVersion::default(),
        }
    }

    #[test]
    fn amendment_for_ts_esm() {
        let patch = manifest_amendment(VariantKey::TsEsm);
        assert_eq!(patch["type"], "module");
        assert_eq!(patch["main"], "dist/server.js");
        assert_eq!(patch["scripts"]["dev"], "node --loader ts-node/esm src/server.ts");
        assert_eq!(patch["scripts"]["build"], "tsc");
    }

    #[test]
    fn amendment_for_javascript_has_no_build() {
        let patch = manifest_amendment(VariantKey::JsCjs);
        assert_eq!(patch["type"], "commonjs");
        assert_eq!(patch["scripts"]["start"], "node src/server.js");
        assert!(patch["scripts"].get("build").is_none());
    }

    #[test]
    fn tsconfig_module_follows_key() {
        assert_eq!(tsconfig(VariantKey::TsEsm)["compilerOptions"]["module"], "NodeNext");
        let cjs = tsconfig(VariantKey::TsCjs);
        assert_eq!(cjs["compilerOptions"]["module"], "CommonJS");
        assert_eq!(cjs["compilerOptions"]["moduleResolution"], "Node");
    }

    #[test]
    fn env_file_lists_required_keys() {
        let env = env_file(&params());
        assert!(env.contains("PORT=4000\n"));
        assert!(env.contains("DB_URI=mongodb://localhost:27017/demo\n"));
        assert!(env.contains("API_VERSION=v1\n"));
    }

    #[test]
    fn manifest_uses_lowercase_name() {
        assert_eq!(manifest(&params())["name"], "demo");
    }

    #[test]
    fn readme_mentions_build_only_for_typescript() {
        assert!(readme(VariantKey::TsEsm, &params()).contains("npm run build"));
        assert!(!readme(VariantKey::JsEsm, &params()).contains("npm run build"));
    }
}
