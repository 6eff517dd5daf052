//! Package manager adapters.

mod command;
mod noop;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use command::CommandPackageManager;
pub use noop::NoopPackageManager;

use nodeforge_core::domain::{DependencyKind, InstallStep};

/// Supported package manager binaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    #[default]
    Npm,
    Pnpm,
    Yarn,
}

impl PackageManagerKind {
    pub const ALL: [Self; 3] = [Self::Npm, Self::Pnpm, Self::Yarn];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
        }
    }

    /// Executable name; the Windows shims are `.cmd` scripts.
    pub fn program(&self) -> String {
        if cfg!(windows) {
            format!("{}.cmd", self.as_str())
        } else {
            self.as_str().to_string()
        }
    }

    /// Arguments for one install step.
    pub fn install_args(&self, step: &InstallStep) -> Vec<String> {
        let mut args: Vec<String> = match (self, step.kind) {
            (Self::Npm, DependencyKind::Runtime) => vec!["install".into()],
            (Self::Npm, DependencyKind::Dev) => vec!["install".into(), "--save-dev".into()],
            (Self::Pnpm | Self::Yarn, DependencyKind::Runtime) => vec!["add".into()],
            (Self::Pnpm | Self::Yarn, DependencyKind::Dev) => vec!["add".into(), "-D".into()],
        };
        args.extend(step.packages.iter().cloned());
        args
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackageManagerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "pnpm" => Ok(Self::Pnpm),
            "yarn" => Ok(Self::Yarn),
            other => Err(format!(
                "unknown package manager '{other}' (expected npm, pnpm or yarn)"
            )),
        }
    }
}
