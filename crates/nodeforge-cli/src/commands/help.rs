//! `nodeforge --help`: a navigable menu of help topics.
//!
//! On a terminal the user picks topics until choosing "Exit"; otherwise
//! every topic is printed once, in order.

use std::fmt::Write as _;
use std::io::IsTerminal;

use clap::CommandFactory;
use console::Term;

use nodeforge_core::domain::{
    CompositionPlanner, DeploymentHelper, PACKAGE_REGISTRY, ProjectConfig, ProjectName,
    packages::REQUIRED_PACKAGES,
};

use crate::cli::Cli;
use crate::config::AppConfig;
use crate::descriptor::DESCRIPTOR;
use crate::error::CliResult;

/// One page of the help menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    GettingStarted,
    Options,
    Layout,
    Packages,
    Deployment,
    Configuration,
    About,
}

impl HelpTopic {
    pub const ALL: [Self; 7] = [
        Self::GettingStarted,
        Self::Options,
        Self::Layout,
        Self::Packages,
        Self::Deployment,
        Self::Configuration,
        Self::About,
    ];

    pub const fn title(&self) -> &'static str {
        match self {
            Self::GettingStarted => "Getting started",
            Self::Options => "Command-line options",
            Self::Layout => "Generated project layout",
            Self::Packages => "Packages",
            Self::Deployment => "Deployment helpers",
            Self::Configuration => "Configuration",
            Self::About => "About",
        }
    }

    pub fn render(&self, config: &AppConfig) -> String {
        match self {
            Self::GettingStarted => getting_started(),
            Self::Options => Cli::command().render_long_help().to_string(),
            Self::Layout => layout(config),
            Self::Packages => packages(),
            Self::Deployment => deployment(),
            Self::Configuration => configuration(config),
            Self::About => about(),
        }
    }
}

/// Show the help menu, or print every topic when not on a terminal.
pub fn execute(config: &AppConfig) -> CliResult<()> {
    let term = Term::stdout();
    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();

    #[cfg(feature = "interactive")]
    if interactive {
        return menu(&term, config);
    }
    #[cfg(not(feature = "interactive"))]
    let _ = interactive;

    for topic in HelpTopic::ALL {
        term.write_line(&page(topic, config))?;
    }
    Ok(())
}

#[cfg(feature = "interactive")]
fn menu(term: &Term, config: &AppConfig) -> CliResult<()> {
    use dialoguer::{Select, theme::ColorfulTheme};

    let theme = ColorfulTheme::default();
    let mut items: Vec<&str> = HelpTopic::ALL.iter().map(|t| t.title()).collect();
    items.push("Exit");

    let mut selected = 0;
    loop {
        selected = Select::with_theme(&theme)
            .with_prompt(format!("{} help", DESCRIPTOR.name))
            .items(&items)
            .default(selected)
            .interact()?;
        let Some(topic) = HelpTopic::ALL.get(selected) else {
            return Ok(());
        };
        term.write_line(&page(*topic, config))?;
    }
}

fn page(topic: HelpTopic, config: &AppConfig) -> String {
    let title = topic.title();
    format!(
        "{title}\n{}\n\n{}\n",
        "=".repeat(title.len()),
        topic.render(config).trim_end()
    )
}

fn getting_started() -> String {
    "Run `nodeforge` with no arguments and answer the questions:\n\
     \n  1. project name\n  2. language (TypeScript or JavaScript)\n  \
     3. module system (ES Modules)\n  4. packages\n  5. port\n  \
     6. deployment helpers\n\
     \nAny answer can be given as a flag instead; the question is then skipped.\n\
     With --yes nothing is asked: missing answers come from the configuration.\n\
     \nExamples:\n  nodeforge\n  nodeforge --name orders-api --lang ts --deploy dockerfile\n  \
     nodeforge --yes --name demo --skip-install\n  nodeforge --yes --dry-run --name demo"
        .to_string()
}

/// A real plan for the configured defaults, so the listing never drifts.
fn layout(config: &AppConfig) -> String {
    let built = ProjectName::parse("my-app").and_then(|name| {
        ProjectConfig::builder()
            .name(name)
            .language(config.defaults.language)
            .packages(config.defaults.packages.iter().copied())
            .port(config.defaults.port)
            .deployments(config.defaults.deployment.iter().copied())
            .api_version(config.defaults.api_version.clone())
            .build()
    });

    let mut out = String::new();
    match built {
        Ok(project) => {
            let plan = CompositionPlanner::plan(&project);
            let _ = writeln!(
                out,
                "With the current defaults ({}), `my-app` is generated as:\n",
                plan.variant()
            );
            for step in plan.steps() {
                let _ = writeln!(out, "  {step}");
            }
        }
        Err(e) => {
            let _ = writeln!(out, "The configured defaults are not valid: {e}");
        }
    }
    out
}

fn packages() -> String {
    let mut out = String::from(
        "Pick any of these at the packages question or with --packages a,b.\n\
         [x] = pre-selected, * = always installed because the generated code imports it\n\n",
    );
    for def in PACKAGE_REGISTRY {
        let checked = if def.default_selected { "[x]" } else { "[ ]" };
        let required = if REQUIRED_PACKAGES.contains(&def.name) { "*" } else { " " };
        let _ = writeln!(out, "  {checked}{required} {:<20} {}", def.name, def.description);
    }
    out
}

fn deployment() -> String {
    let mut out = String::from("Select with --deploy a,b (none by default).\n\n");
    for helper in DeploymentHelper::ALL {
        let files = match helper {
            DeploymentHelper::Dockerfile => "Dockerfile, .dockerignore",
            DeploymentHelper::Compose => "docker-compose.yml (app + mongo)",
            DeploymentHelper::Jenkins => "Jenkinsfile",
            DeploymentHelper::GithubActions => ".github/workflows/ci.yml",
        };
        let _ = writeln!(
            out,
            "  {:<16} {:<26} {files}",
            helper.as_str(),
            helper.display_name()
        );
    }
    out
}

fn configuration(config: &AppConfig) -> String {
    let mut out = format!(
        "Config file: {}\n\
         Override any key with NODEFORGE__<SECTION>__<KEY>, e.g. NODEFORGE__DEFAULTS__PORT=8080.\n\
         Flags override both.\n\nCurrent values:\n\n",
        AppConfig::config_path().display()
    );
    match config.to_toml() {
        Ok(text) => out.push_str(&text),
        Err(e) => {
            let _ = writeln!(out, "{e:#}");
        }
    }
    out
}

fn about() -> String {
    format!(
        "{}\n{}\nAuthors: {}",
        DESCRIPTOR.title(),
        DESCRIPTOR.description,
        DESCRIPTOR.authors_line()
    )
}
