//! Module syntax shared by every source renderer in a run.
//!
//! All `import`/`require`/`export` statements and type annotations go
//! through [`ModuleSyntax`]. It is built once from a [`VariantKey`], so the
//! relative-import suffix cannot differ between two files of one project.
//!
//! TypeScript sources always use `import`/`export` statements; under
//! CommonJS the compiler lowers them to `require`. Only plain JavaScript
//! under CommonJS writes `require`/`module.exports` by hand.

use crate::domain::variant::{ImportSuffix, VariantKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleSyntax {
    key: VariantKey,
    suffix: ImportSuffix,
}

impl ModuleSyntax {
    pub const fn for_key(key: VariantKey) -> Self {
        Self {
            key,
            suffix: key.import_suffix(),
        }
    }

    pub const fn key(&self) -> VariantKey {
        self.key
    }

    pub const fn suffix(&self) -> ImportSuffix {
        self.suffix
    }

    const fn uses_require(&self) -> bool {
        matches!(self.key, VariantKey::JsCjs)
    }

    /// Specifier for a project-relative module, e.g. `../utils/logger.js`.
    pub fn local(&self, path: &str) -> String {
        format!("{path}{}", self.suffix.as_str())
    }

    /// `import name from 'module';`
    pub fn import_default(&self, name: &str, module: &str) -> String {
        if self.uses_require() {
            format!("const {name} = require('{module}');")
        } else {
            format!("import {name} from '{module}';")
        }
    }

    /// `import { a, b as c } from 'module';`
    pub fn import_named(&self, names: &[&str], module: &str) -> String {
        if self.uses_require() {
            let bindings: Vec<String> = names.iter().map(|n| n.replace(" as ", ": ")).collect();
            format!("const {{ {} }} = require('{module}');", bindings.join(", "))
        } else {
            format!("import {{ {} }} from '{module}';", names.join(", "))
        }
    }

    /// Default import of a project-relative module, suffix applied.
    pub fn import_local(&self, name: &str, path: &str) -> String {
        self.import_default(name, &self.local(path))
    }

    /// Type-only import; nothing for JavaScript.
    pub fn import_types(&self, names: &[&str], module: &str) -> Option<String> {
        self.key
            .is_typescript()
            .then(|| format!("import type {{ {} }} from '{module}';", names.join(", ")))
    }

    /// `export default name;`
    pub fn export_default(&self, name: &str) -> String {
        if self.uses_require() {
            format!("module.exports = {name};")
        } else {
            format!("export default {name};")
        }
    }

    /// `name: Type` for TypeScript, `name` for JavaScript.
    pub fn param(&self, name: &str, ty: &str) -> String {
        if self.key.is_typescript() {
            format!("{name}: {ty}")
        } else {
            name.to_string()
        }
    }

    /// `: Type` return/variable annotation for TypeScript, empty otherwise.
    pub fn annotate(&self, ty: &str) -> String {
        if self.key.is_typescript() {
            format!(": {ty}")
        } else {
            String::new()
        }
    }
}
