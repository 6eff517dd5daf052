//! Deployment descriptors. Each one is planned only when its helper is
//! selected; TypeScript keys add a build step everywhere.

use super::{Lines, RenderParams};
use crate::domain::variant::VariantKey;

const NODE_IMAGE: &str = "node:20-alpine";

pub fn dockerfile(key: VariantKey, p: &RenderParams) -> String {
    let mut out = Lines::default();
    out.line(format!("FROM {NODE_IMAGE}"))
        .blank()
        .line("WORKDIR /app")
        .blank()
        .line("COPY package*.json ./")
        .line("RUN npm install")
        .blank()
        .line("COPY . .");
    if key.is_typescript() {
        out.line("RUN npm run build");
    }
    out.blank()
        .line(format!("EXPOSE {}", p.port))
        .blank()
        .line("CMD [\"npm\", \"start\"]")
        .finish()
}

pub fn dockerignore() -> String {
    Lines::default()
        .lines(&["node_modules", "dist", ".env", ".git", "npm-debug.log"])
        .finish()
}

pub fn compose(p: &RenderParams) -> String {
    let name = &p.package_name;
    Lines::default()
        .line("services:")
        .line(format!("  {name}:"))
        .line("    build: .")
        .line("    ports:")
        .line(format!("      - \"{0}:{0}\"", p.port))
        .line("    env_file:")
        .line("      - .env")
        .line("    environment:")
        .line(format!("      - DB_URI=mongodb://mongo:27017/{name}"))
        .line("    volumes:")
        .line("      - ./src:/app/src")
        .line("    depends_on:")
        .line("      - mongo")
        .lines(&[
            "  mongo:",
            "    image: mongo:7",
            "    ports:",
            "      - \"27017:27017\"",
            "    volumes:",
            "      - mongo-data:/data/db",
        ])
        .blank()
        .line("volumes:")
        .line("  mongo-data:")
        .finish()
}

fn jenkins_stage(out: &mut Lines, name: &str, command: &str) {
    out.line(format!("        stage('{name}') {{"))
        .line("            steps {")
        .line(format!("                {command}"))
        .line("            }")
        .line("        }");
}

pub fn jenkinsfile(key: VariantKey, p: &RenderParams) -> String {
    let mut out = Lines::default();
    out.line("pipeline {")
        .line("    agent any")
        .blank()
        .line("    environment {")
        .line(format!("        IMAGE_NAME = '{}'", p.package_name))
        .line("    }")
        .blank()
        .line("    stages {");
    jenkins_stage(&mut out, "Checkout", "checkout scm");
    jenkins_stage(&mut out, "Install", "sh 'npm install'");
    if key.is_typescript() {
        jenkins_stage(&mut out, "Build", "sh 'npm run build'");
    }
    jenkins_stage(&mut out, "Test", "sh 'npm test'");
    jenkins_stage(
        &mut out,
        "Docker Build",
        "sh 'docker build -t ${IMAGE_NAME}:${BUILD_NUMBER} .'",
    );
    out.line("    }").line("}").finish()
}

pub fn github_actions(key: VariantKey) -> String {
    let mut out = Lines::default();
    out.lines(&[
        "name: CI",
        "",
        "on:",
        "  push:",
        "    branches: [main]",
        "  pull_request:",
        "    branches: [main]",
        "",
        "jobs:",
        "  build:",
        "    runs-on: ubuntu-latest",
        "    steps:",
        "      - uses: actions/checkout@v4",
        "      - uses: actions/setup-node@v4",
        "        with:",
        "          node-version: 20",
        "      - run: npm install",
    ]);
    if key.is_typescript() {
        out.line("      - run: npm run build");
    }
    out.line("      - run: npm test").finish()
}
