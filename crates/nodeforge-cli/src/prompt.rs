//! Interactive questions, one per configuration field.
//!
//! Every answer is validated by the same domain parser the flags use; a
//! rejected answer is shown inline and the question is asked again.

use std::collections::BTreeSet;
use std::str::FromStr;

use console::Term;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};

use nodeforge_core::domain::{
    ConflictResolution, DeploymentHelper, DomainError, LanguageVariant, ModuleSystem,
    NameConflict, PACKAGE_REGISTRY, PackageName, Port, ProjectName,
};

use crate::error::{CliError, CliResult};

/// Asks questions on stderr.
pub struct Prompter {
    theme: ColorfulTheme,
    term: Term,
}

impl Default for Prompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
            term: Term::stderr(),
        }
    }

    pub fn name(&self, default: &str) -> CliResult<ProjectName> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt("Project name")
            .default(default.to_string())
            .validate_with(|input: &String| {
                ProjectName::parse(input)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;
        Ok(ProjectName::parse(&raw)?)
    }

    pub fn language(&self, default: LanguageVariant) -> CliResult<LanguageVariant> {
        let items: Vec<&str> = LanguageVariant::ALL.iter().map(|l| l.display_name()).collect();
        let index = Select::with_theme(&self.theme)
            .with_prompt("Language")
            .items(&items)
            .default(position(&LanguageVariant::ALL, &default))
            .interact()?;
        Ok(LanguageVariant::ALL[index])
    }

    /// Re-asks until an enabled module system is chosen.
    pub fn module_system(&self) -> CliResult<ModuleSystem> {
        let items: Vec<String> = ModuleSystem::ALL
            .iter()
            .map(|m| {
                if m.is_enabled() {
                    m.display_name().to_string()
                } else {
                    format!("{} (not supported yet)", m.display_name())
                }
            })
            .collect();

        loop {
            let index = Select::with_theme(&self.theme)
                .with_prompt("Module system")
                .items(&items)
                .default(0)
                .interact()?;
            let choice = ModuleSystem::ALL[index];
            if choice.is_enabled() {
                return Ok(choice);
            }
            self.reject(&DomainError::UnsupportedModuleSystem {
                module_system: choice.display_name().to_string(),
            })?;
        }
    }

    pub fn packages(&self, defaults: &BTreeSet<PackageName>) -> CliResult<BTreeSet<PackageName>> {
        let labels: Vec<String> = PACKAGE_REGISTRY
            .iter()
            .map(|def| format!("{:<20} {}", def.name, def.description))
            .collect();
        let checked: Vec<bool> = PACKAGE_REGISTRY
            .iter()
            .map(|def| defaults.iter().any(|p| p.as_str() == def.name))
            .collect();

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt("Packages (space to toggle, enter to confirm)")
            .items(&labels)
            .defaults(&checked)
            .interact()?;

        picked
            .into_iter()
            .map(|index| PackageName::parse(PACKAGE_REGISTRY[index].name).map_err(CliError::from))
            .collect()
    }

    pub fn port(&self, default: Port) -> CliResult<Port> {
        let raw: String = Input::with_theme(&self.theme)
            .with_prompt("Port")
            .default(default.to_string())
            .validate_with(|input: &String| {
                Port::from_str(input).map(|_| ()).map_err(|e| e.to_string())
            })
            .interact_text()?;
        Ok(Port::from_str(&raw)?)
    }

    pub fn deployment(
        &self,
        defaults: &BTreeSet<DeploymentHelper>,
    ) -> CliResult<BTreeSet<DeploymentHelper>> {
        let labels: Vec<&str> = DeploymentHelper::ALL.iter().map(|d| d.display_name()).collect();
        let checked: Vec<bool> = DeploymentHelper::ALL
            .iter()
            .map(|d| defaults.contains(d))
            .collect();

        let picked = MultiSelect::with_theme(&self.theme)
            .with_prompt("Deployment helpers")
            .items(&labels)
            .defaults(&checked)
            .interact()?;

        Ok(picked.into_iter().map(|i| DeploymentHelper::ALL[i]).collect())
    }

    /// Ask how to handle an existing target directory.
    pub fn conflict(&self, conflict: &NameConflict) -> CliResult<ConflictResolution> {
        let items = ["Overwrite it", "Choose another name", "Abort"];
        let index = Select::with_theme(&self.theme)
            .with_prompt(format!(
                "'{}' already exists",
                conflict.existing_path().display()
            ))
            .items(&items)
            .default(1)
            .interact()?;

        match index {
            0 => Ok(ConflictResolution::Overwrite),
            1 => {
                let suggested = conflict
                    .suggested_name()
                    .map(|n| n.to_string())
                    .unwrap_or_default();
                Ok(ConflictResolution::Rename(self.name(&suggested)?))
            }
            _ => Ok(ConflictResolution::Abort),
        }
    }

    pub fn confirm(&self, prompt: &str) -> CliResult<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(true)
            .interact()?)
    }

    fn reject(&self, err: &DomainError) -> CliResult<()> {
        self.term.write_line(&format!("  \u{2717} {err}"))?;
        for hint in err.suggestions() {
            self.term.write_line(&format!("    {hint}"))?;
        }
        Ok(())
    }
}

fn position<T: PartialEq>(all: &[T], wanted: &T) -> usize {
    all.iter().position(|x| x == wanted).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_index_follows_value() {
        assert_eq!(position(&LanguageVariant::ALL, &LanguageVariant::JavaScript), 1);
        assert_eq!(position(&DeploymentHelper::ALL, &DeploymentHelper::Jenkins), 2);
    }
}
