//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.
//!
//! `-h/--help` and `-v/--version` are ordinary flags rather than clap's
//! built-ins: help opens the navigable help menu and version prints the
//! tool descriptor.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, ValueEnum};
use nodeforge_core::domain::{LanguageVariant, ModuleSystem};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "nodeforge",
    bin_name = "nodeforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a consistent Node.js backend project",
    long_about = "nodeforge asks a few questions (language, module system, \
                  packages, port, deployment helpers) and writes a complete \
                  Express backend skeleton whose files all agree with each other.",
    after_help = "EXAMPLES:\n\
        \x20 nodeforge\n\
        \x20 nodeforge --name orders-api --lang ts --port 4000 --deploy dockerfile,compose\n\
        \x20 nodeforge --yes --name demo --lang js --skip-install\n\
        \x20 nodeforge --yes --dry-run --name demo",
    disable_help_flag    = true,
    disable_version_flag = true,
)]
pub struct Cli {
    /// Open the help menu.
    #[arg(short = 'h', long = "help", action = ArgAction::SetTrue, help = "Open the help menu")]
    pub help: bool,

    /// Print version information.
    #[arg(
        short = 'v',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print version, author and description"
    )]
    pub version: bool,

    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub generate: GenerateArgs,
}

// ── generation ────────────────────────────────────────────────────────────────

/// Answers that can be given up front instead of through the prompts.
///
/// Values stay as raw strings where the domain owns validation, so a bad
/// value is reported with the same message and suggestions as in the
/// prompt.
#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Project name; also the directory name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Source language.
    #[arg(
        short = 'l',
        long = "lang",
        value_name = "LANGUAGE",
        value_enum,
        help = "Source language"
    )]
    pub language: Option<LangArg>,

    /// Module system.
    #[arg(
        short = 'm',
        long = "module",
        value_name = "MODULE",
        value_enum,
        help = "Module system"
    )]
    pub module: Option<ModuleArg>,

    /// Runtime packages, comma separated.
    #[arg(
        long = "packages",
        value_name = "PKG",
        value_delimiter = ',',
        num_args = 1..,
        help = "Runtime packages (comma separated)"
    )]
    pub packages: Option<Vec<String>>,

    /// Port the generated server listens on.
    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Server port (1-65535)")]
    pub port: Option<String>,

    /// Deployment helpers, comma separated.
    #[arg(
        long = "deploy",
        value_name = "HELPER",
        value_delimiter = ',',
        num_args = 1..,
        help = "Deployment helpers: dockerfile, compose, jenkins, github-actions"
    )]
    pub deploy: Option<Vec<String>>,

    /// Directory the project folder is created in.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Parent directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    /// Skip every prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "No prompts: use flags, then configured defaults"
    )]
    pub yes: bool,

    /// Overwrite an existing directory (destructive).
    #[arg(long = "force", help = "Overwrite an existing project directory")]
    pub force: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Print the plan without writing anything")]
    pub dry_run: bool,

    /// Do not run the package manager.
    #[arg(long = "skip-install", help = "Skip dependency installation")]
    pub skip_install: bool,
}

// ── value enums ───────────────────────────────────────────────────────────────

/// `--lang` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    #[value(name = "ts", alias = "typescript")]
    TypeScript,
    #[value(name = "js", alias = "javascript")]
    JavaScript,
}

impl From<LangArg> for LanguageVariant {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::TypeScript => LanguageVariant::TypeScript,
            LangArg::JavaScript => LanguageVariant::JavaScript,
        }
    }
}

/// `--module` values.
///
/// `cjs` parses so that the rejection comes from the configuration model
/// with its own message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModuleArg {
    #[value(name = "esm", alias = "module")]
    Esm,
    #[value(name = "cjs", alias = "commonjs")]
    Cjs,
}

impl From<ModuleArg> for ModuleSystem {
    fn from(arg: ModuleArg) -> Self {
        match arg {
            ModuleArg::Esm => ModuleSystem::EsModules,
            ModuleArg::Cjs => ModuleSystem::CommonJs,
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
