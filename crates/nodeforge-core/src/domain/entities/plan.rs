//! Composition plan: the ordered list of everything one run emits.
//!
//! A plan is data only. Every file body is rendered when the plan is built,
//! so two plans for the same configuration compare equal and the emission
//! driver never has to compute content.

use std::collections::HashSet;
use std::fmt;

use serde_json::{Map, Value};

use crate::domain::{entities::common::RelativePath, error::DomainError, variant::VariantKey};

/// What an artifact puts on disk.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactContent {
    /// Create a directory.
    Directory,
    /// Create a file with exactly this text.
    Text(String),
    /// Amend an existing JSON file with an RFC 7386 merge patch.
    JsonMerge(Value),
}

/// One generated file or directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSpec {
    pub path: RelativePath,
    pub variant: VariantKey,
    pub content: ArtifactContent,
}

impl ArtifactSpec {
    pub fn directory(path: impl Into<RelativePath>, variant: VariantKey) -> Self {
        Self {
            path: path.into(),
            variant,
            content: ArtifactContent::Directory,
        }
    }

    pub fn file(path: impl Into<RelativePath>, variant: VariantKey, content: String) -> Self {
        Self {
            path: path.into(),
            variant,
            content: ArtifactContent::Text(content),
        }
    }

    pub fn json_merge(path: impl Into<RelativePath>, variant: VariantKey, patch: Value) -> Self {
        Self {
            path: path.into(),
            variant,
            content: ArtifactContent::JsonMerge(patch),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.content, ArtifactContent::Directory)
    }

    /// Text of a `Text` artifact.
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ArtifactContent::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Patch of a `JsonMerge` artifact.
    pub fn patch(&self) -> Option<&Value> {
        match &self.content {
            ArtifactContent::JsonMerge(v) => Some(v),
            _ => None,
        }
    }

    /// Apply this artifact's merge patch to the current file text.
    ///
    /// The result is pretty-printed with a trailing newline, matching what
    /// the planner renders for freshly created JSON files.
    pub fn amend(&self, existing: &str) -> Result<String, DomainError> {
        let patch = self.patch().ok_or_else(|| DomainError::InvalidAmendment {
            path: self.path.to_string(),
            reason: "artifact is not a JSON amendment".into(),
        })?;
        let mut document: Value =
            serde_json::from_str(existing).map_err(|e| DomainError::InvalidAmendment {
                path: self.path.to_string(),
                reason: e.to_string(),
            })?;
        merge_patch(&mut document, patch);
        Ok(render_json(&document))
    }
}

/// Which dependency table an install step writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyKind {
    Runtime,
    Dev,
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Runtime => f.write_str("dependencies"),
            Self::Dev => f.write_str("devDependencies"),
        }
    }
}

/// A package-manager invocation scheduled between artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub kind: DependencyKind,
    pub packages: Vec<String>,
}

/// One entry of a [`CompositionPlan`].
#[derive(Debug, Clone, PartialEq)]
pub enum PlanStep {
    Emit(ArtifactSpec),
    Install(InstallStep),
}

impl fmt::Display for PlanStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emit(a) => match a.content {
                ArtifactContent::Directory => write!(f, "create  {}/", a.path),
                ArtifactContent::Text(_) => write!(f, "write   {}", a.path),
                ArtifactContent::JsonMerge(_) => write!(f, "amend   {}", a.path),
            },
            Self::Install(step) => {
                write!(f, "install {} ({})", step.packages.join(" "), step.kind)
            }
        }
    }
}

/// Ordered list of steps produced for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionPlan {
    pub(crate) variant: VariantKey,
    pub(crate) steps: Vec<PlanStep>,
}

impl CompositionPlan {
    pub(crate) fn new(variant: VariantKey) -> Self {
        Self {
            variant,
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, artifact: ArtifactSpec) {
        self.steps.push(PlanStep::Emit(artifact));
    }

    pub(crate) fn push_install(&mut self, step: InstallStep) {
        if !step.packages.is_empty() {
            self.steps.push(PlanStep::Install(step));
        }
    }

    pub fn variant(&self) -> VariantKey {
        self.variant
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }

    /// Artifacts in emission order (install steps skipped).
    pub fn artifacts(&self) -> impl Iterator<Item = &ArtifactSpec> {
        self.steps.iter().filter_map(|s| match s {
            PlanStep::Emit(a) => Some(a),
            PlanStep::Install(_) => None,
        })
    }

    pub fn install_steps(&self) -> impl Iterator<Item = &InstallStep> {
        self.steps.iter().filter_map(|s| match s {
            PlanStep::Install(i) => Some(i),
            PlanStep::Emit(_) => None,
        })
    }

    /// All artifacts targeting `path`, in order.
    pub fn artifacts_at<'a, 'p>(
        &'a self,
        path: &'p str,
    ) -> impl Iterator<Item = &'a ArtifactSpec> + use<'a, 'p> {
        self.artifacts().filter(move |a| a.path.as_str() == path)
    }

    /// First artifact targeting `path`.
    pub fn artifact(&self, path: &str) -> Option<&ArtifactSpec> {
        self.artifacts_at(path).next()
    }

    pub fn file_count(&self) -> usize {
        self.artifacts()
            .filter(|a| matches!(a.content, ArtifactContent::Text(_)))
            .count()
    }

    pub fn directory_count(&self) -> usize {
        self.artifacts().filter(|a| a.is_directory()).count()
    }

    /// Check ordering and uniqueness rules.
    ///
    /// - a path is created at most once
    /// - a JSON amendment targets a file created earlier
    /// - every entry's parent directory is created earlier (or is the root)
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut directories: HashSet<&str> = HashSet::new();
        let mut files: HashSet<&str> = HashSet::new();

        for artifact in self.artifacts() {
            let path = artifact.path.as_str();

            if let Some(parent) = artifact.path.parent() {
                if !directories.contains(parent.as_str()) {
                    return Err(DomainError::OrphanedArtifact {
                        path: path.to_string(),
                    });
                }
            }

            match artifact.content {
                ArtifactContent::Directory => {
                    if files.contains(path) || !directories.insert(path) {
                        return Err(DomainError::DuplicatePath {
                            path: path.to_string(),
                        });
                    }
                }
                ArtifactContent::Text(_) => {
                    if directories.contains(path) || !files.insert(path) {
                        return Err(DomainError::DuplicatePath {
                            path: path.to_string(),
                        });
                    }
                }
                ArtifactContent::JsonMerge(_) => {
                    if !files.contains(path) {
                        return Err(DomainError::InvalidAmendment {
                            path: path.to_string(),
                            reason: "amendment planned before the file is created".into(),
                        });
                    }
                }
            }
        }

        Ok(())
    }
}

/// RFC 7386 JSON merge patch.
pub fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_map) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target_map) = target {
        for (key, value) in patch_map {
            if value.is_null() {
                target_map.remove(key);
            } else {
                merge_patch(target_map.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

/// Pretty JSON with a trailing newline.
pub fn render_json(value: &Value) -> String {
    format!("{value:#}\n")
}
