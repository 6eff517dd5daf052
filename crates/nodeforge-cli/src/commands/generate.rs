//! Implementation of the default command: generate a project.
//!
//! Responsibility: gather answers (flags, prompts, configured defaults),
//! settle a name conflict, call the core service and display results. No
//! generation logic lives here.

use std::collections::BTreeSet;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{debug, info, instrument, warn};

use nodeforge_adapters::{CommandPackageManager, LocalFilesystem, NoopPackageManager};
use nodeforge_core::{
    application::{
        ApplicationError, CancelFlag, GenerateService, GenerationReport, ports::PackageManager,
    },
    domain::{
        CompositionPlan, Confirmation, ConfirmedProject, ConflictResolution, DeploymentHelper,
        LanguageVariant, ModuleSystem, PackageName, Placement, Port, ProjectConfig, ProjectName,
    },
};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::ProgressPackageManager,
};

#[cfg(feature = "interactive")]
use crate::prompt::Prompter;

/// Name used when neither a flag nor a prompt supplies one.
const DEFAULT_PROJECT_NAME: &str = "my-node-app";

/// Where answers come from.
enum Answers {
    /// `--yes`: flags, then configured defaults.
    Flags,
    #[cfg(feature = "interactive")]
    Prompt(Prompter),
}

/// Execute a generation run.
///
/// Dispatch sequence:
/// 1. Collect the configuration (flags, prompts or defaults)
/// 2. Check the target directory and settle any conflict
/// 3. Show the configuration and confirm (interactive only)
/// 4. Early-exit with the plan if `--dry-run`
/// 5. Install the Ctrl-C handler and emit the project
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(yes = args.yes, dry_run = args.dry_run))]
pub fn execute(
    args: GenerateArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let answers = answers(&args)?;

    // 1. Configuration
    let project_config = collect(&args, &config, &answers)?;
    debug!(config = %project_config, "Configuration collected");

    // 2. Placement
    let cancel = CancelFlag::new();
    let skip_install = args.skip_install || config.install.skip;
    let service = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        package_manager(&config, skip_install || args.dry_run, &cancel, output),
    )
    .with_cancel_flag(cancel.clone());

    let parent = args.output.clone().unwrap_or_else(|| PathBuf::from("."));
    let project = place(&service, project_config, parent, &args, &answers)?;
    if project.placement() == Placement::Overwrite {
        output.warning(&format!(
            "'{}' will be replaced",
            project.root().display()
        ))?;
    }

    // 3. Summary and confirmation
    show_configuration(&project, skip_install, output)?;
    #[cfg(feature = "interactive")]
    if let Answers::Prompt(prompter) = &answers {
        if !args.dry_run && !prompter.confirm("Generate the project?")? {
            return Err(CliError::Core(ApplicationError::Aborted.into()));
        }
    }

    // 4. Dry run
    let plan = service.plan(&project)?;
    if args.dry_run {
        return show_plan(&project, &plan, output);
    }

    // 5. Emit
    install_interrupt_handler(&cancel);
    output.header(&format!("Creating '{}'...", project.config().name()))?;
    info!(root = %project.root().display(), "Generation started");

    let report = service.emit(&project, &plan)?;
    info!(run_id = %report.run_id, files = report.files, "Generation completed");

    // 6. Success + next steps
    next_steps(&project, &report, &config, skip_install, global, output)
}

fn answers(args: &GenerateArgs) -> CliResult<Answers> {
    if args.yes {
        return Ok(Answers::Flags);
    }

    #[cfg(feature = "interactive")]
    {
        if !std::io::stdin().is_terminal() {
            return Err(CliError::InvalidInput {
                message: "stdin is not a terminal, so questions cannot be asked; pass --yes".into(),
            });
        }
        Ok(Answers::Prompt(Prompter::new()))
    }

    #[cfg(not(feature = "interactive"))]
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Configuration ─────────────────────────────────────────────────────────────

/// Build the configuration field by field; a flag always wins over its
/// question.
fn collect(args: &GenerateArgs, config: &AppConfig, answers: &Answers) -> CliResult<ProjectConfig> {
    let defaults = &config.defaults;

    let name = match (&args.name, answers) {
        (Some(raw), _) => ProjectName::parse(raw)?,
        (None, Answers::Flags) => ProjectName::parse(DEFAULT_PROJECT_NAME)?,
        #[cfg(feature = "interactive")]
        (None, Answers::Prompt(p)) => p.name(DEFAULT_PROJECT_NAME)?,
    };

    let language = match (args.language, answers) {
        (Some(lang), _) => LanguageVariant::from(lang),
        (None, Answers::Flags) => defaults.language,
        #[cfg(feature = "interactive")]
        (None, Answers::Prompt(p)) => p.language(defaults.language)?,
    };

    let module_system = match (args.module, answers) {
        (Some(module), _) => ModuleSystem::from(module),
        (None, Answers::Flags) => ModuleSystem::EsModules,
        #[cfg(feature = "interactive")]
        (None, Answers::Prompt(p)) => p.module_system()?,
    };

    let packages = match (&args.packages, answers) {
        (Some(raw), _) => parse_all::<PackageName>(raw)?,
        (None, Answers::Flags) => defaults.packages.clone(),
        #[cfg(feature = "interactive")]
        (None, Answers::Prompt(p)) => p.packages(&defaults.packages)?,
    };

    let port = match (&args.port, answers) {
        (Some(raw), _) => Port::from_str(raw)?,
        (None, Answers::Flags) => defaults.port,
        #[cfg(feature = "interactive")]
        (None, Answers::Prompt(p)) => p.port(defaults.port)?,
    };

    let deployment = match (&args.deploy, answers) {
        (Some(raw), _) => parse_all::<DeploymentHelper>(raw)?,
        (None, Answers::Flags) => defaults.deployment.clone(),
        #[cfg(feature = "interactive")]
        (None, Answers::Prompt(p)) => p.deployment(&defaults.deployment)?,
    };

    Ok(ProjectConfig::builder()
        .name(name)
        .language(language)
        .module_system(module_system)?
        .packages(packages)
        .port(port)
        .deployments(deployment)
        .api_version(defaults.api_version.clone())
        .build()?)
}

fn parse_all<T>(raw: &[String]) -> CliResult<BTreeSet<T>>
where
    T: FromStr + Ord,
    CliError: From<T::Err>,
{
    raw.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| T::from_str(s).map_err(CliError::from))
        .collect()
}

// ── Placement ─────────────────────────────────────────────────────────────────

/// Confirm the target directory, resolving conflicts until one is free or
/// the user aborts.
fn place(
    service: &GenerateService,
    config: ProjectConfig,
    parent: PathBuf,
    args: &GenerateArgs,
    answers: &Answers,
) -> CliResult<ConfirmedProject> {
    let mut confirmation = service.confirm(config, parent)?;
    loop {
        let conflict = match confirmation {
            Confirmation::Confirmed(project) => return Ok(project),
            Confirmation::Conflict(conflict) => conflict,
        };

        let resolution = if args.force {
            ConflictResolution::Overwrite
        } else {
            match answers {
                Answers::Flags => return Err(CliError::project_exists(&conflict.existing_path())),
                #[cfg(feature = "interactive")]
                Answers::Prompt(p) => p.conflict(&conflict)?,
            }
        };
        confirmation = service.resolve(conflict, resolution)?;
    }
}

fn package_manager(
    config: &AppConfig,
    skip_install: bool,
    cancel: &CancelFlag,
    output: &OutputManager,
) -> Box<dyn PackageManager> {
    if skip_install {
        return Box::new(NoopPackageManager::new());
    }
    let runner = CommandPackageManager::new(config.install.package_manager, cancel.clone());
    let visible = !output.is_quiet() && std::io::stderr().is_terminal();
    Box::new(ProgressPackageManager::new(Box::new(runner), visible))
}

/// Ctrl-C raises the cancel flag; the package manager adapter kills its
/// child and the emitter rolls back.
fn install_interrupt_handler(cancel: &CancelFlag) {
    let flag = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || flag.cancel()) {
        warn!(error = %e, "Could not install the Ctrl-C handler");
    }
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    project: &ConfirmedProject,
    skip_install: bool,
    out: &OutputManager,
) -> CliResult<()> {
    let config = project.config();
    let packages: Vec<&str> = config.packages().iter().map(|p| p.as_str()).collect();
    let deployment: Vec<&str> = config.deployment().iter().map(|d| d.as_str()).collect();

    out.header("Configuration")?;
    out.print(&format!("  Project:      {}", config.name()))?;
    out.print(&format!("  Language:     {}", config.language().display_name()))?;
    out.print(&format!("  Modules:      {}", config.module_system().display_name()))?;
    out.print(&format!("  Packages:     {}", join_or_none(&packages)))?;
    out.print(&format!("  Port:         {}", config.port()))?;
    out.print(&format!("  Deployment:   {}", join_or_none(&deployment)))?;
    out.print(&format!("  Location:     {}", project.root().display()))?;
    if skip_install {
        out.print("  Install:      skipped")?;
    }
    out.print("")?;
    Ok(())
}

fn show_plan(project: &ConfirmedProject, plan: &CompositionPlan, out: &OutputManager) -> CliResult<()> {
    out.info(&format!(
        "Dry run: would create '{}' at {} ({})",
        project.config().name(),
        project.root().display(),
        plan.variant()
    ))?;
    for step in plan.steps() {
        out.detail(&step.to_string())?;
    }
    out.info(&format!(
        "{} files, {} directories, {} install steps; nothing was written",
        plan.file_count(),
        plan.directory_count(),
        plan.install_steps().count()
    ))?;
    Ok(())
}

fn next_steps(
    project: &ConfirmedProject,
    report: &GenerationReport,
    config: &AppConfig,
    skip_install: bool,
    global: &GlobalArgs,
    out: &OutputManager,
) -> CliResult<()> {
    out.success(&format!(
        "Project '{}' created at {} ({} files, {} directories)",
        project.config().name(),
        report.root.display(),
        report.files,
        report.directories
    ))?;

    if global.quiet {
        return Ok(());
    }

    let pm = config.install.package_manager;
    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", report.root.display()))?;
    if skip_install {
        out.print(&format!("  {pm} install"))?;
    }
    out.print(&format!("  {pm} run dev"))?;
    Ok(())
}

fn join_or_none(items: &[&str]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(args: &[&str]) -> GenerateArgs {
        use clap::Parser;
        let mut argv = vec!["nodeforge", "--yes"];
        argv.extend_from_slice(args);
        crate::cli::Cli::parse_from(argv).generate
    }

    #[test]
    fn flags_fall_back_to_configured_defaults() {
        let config = AppConfig::default();
        let project = collect(&flags(&[]), &config, &Answers::Flags).unwrap();
        assert_eq!(project.name().as_str(), DEFAULT_PROJECT_NAME);
        assert_eq!(project.language(), config.defaults.language);
        assert_eq!(project.port(), config.defaults.port);
        assert_eq!(project.packages(), &config.defaults.packages);
        assert!(project.deployment().is_empty());
    }

    #[test]
    fn flags_override_defaults() {
        let args = flags(&[
            "--name",
            "orders-api",
            "--lang",
            "js",
            "--packages",
            "express,cors",
            "--port",
            "4000",
            "--deploy",
            "dockerfile,compose",
        ]);
        let project = collect(&args, &AppConfig::default(), &Answers::Flags).unwrap();
        assert_eq!(project.name().as_str(), "orders-api");
        assert_eq!(project.language(), LanguageVariant::JavaScript);
        assert_eq!(project.port().get(), 4000);
        assert_eq!(project.packages().len(), 2);
        assert!(project.wants(DeploymentHelper::Compose));
    }

    #[test]
    fn bad_flag_values_are_user_errors() {
        for bad in [
            &["--port", "0"][..],
            &["--port", "65536"],
            &["--name", ".hidden"],
            &["--packages", "left-pad"],
            &["--deploy", "kubernetes"],
            &["--module", "cjs"],
        ] {
            let err = collect(&flags(bad), &AppConfig::default(), &Answers::Flags).unwrap_err();
            assert_eq!(err.exit_code(), 2, "{bad:?}");
        }
    }

    #[test]
    fn parse_all_ignores_blanks_and_duplicates() {
        let raw = vec!["express".to_string(), " ".into(), "Express".into()];
        let set = parse_all::<PackageName>(&raw).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn join_or_none_formats() {
        assert_eq!(join_or_none(&[]), "none");
        assert_eq!(join_or_none(&["a", "b"]), "a, b");
    }
}
