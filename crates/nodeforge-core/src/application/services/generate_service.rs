//! Generate Service - main application orchestrator.
//!
//! This service coordinates the generation workflow:
//! 1. Check the target directory (`confirm`), resolving name conflicts
//! 2. Plan the project (`plan`)
//! 3. Emit the plan through the ports (`generate`)
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, CancelFlag,
        ports::{Filesystem, PackageManager},
        services::emitter::{Emitter, GenerationReport},
    },
    domain::{
        CompositionPlan, CompositionPlanner, Confirmation, ConfirmedProject, ConflictResolution,
        DomainValidator as validator, NameConflict, Placement, ProjectConfig,
    },
    error::ForgeResult,
};

/// Main generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    package_manager: Box<dyn PackageManager>,
    cancel: CancelFlag,
}

impl GenerateService {
    /// Create a new generate service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use nodeforge_core::application::{GenerateService, ports::*};
    ///
    /// let service = GenerateService::new(
    ///     filesystem,      // impl Filesystem
    ///     package_manager, // impl PackageManager
    /// );
    /// ```
    pub fn new(filesystem: Box<dyn Filesystem>, package_manager: Box<dyn PackageManager>) -> Self {
        Self {
            filesystem,
            package_manager,
            cancel: CancelFlag::new(),
        }
    }

    /// Share a cancellation flag with a signal handler or adapter.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancel_flag(&self) -> &CancelFlag {
        &self.cancel
    }

    /// Check whether `<parent>/<name>` is free.
    #[instrument(skip_all, fields(project = %config.name(), parent = %parent.as_ref().display()))]
    pub fn confirm(
        &self,
        config: ProjectConfig,
        parent: impl AsRef<Path>,
    ) -> ForgeResult<Confirmation> {
        validator::validate_config(&config)?;

        let parent = parent.as_ref().to_path_buf();
        let root = parent.join(config.name().as_str());
        if self.filesystem.exists(&root) {
            info!(path = %root.display(), "Target directory already exists");
            return Ok(Confirmation::Conflict(NameConflict::new(config, parent)));
        }

        Ok(Confirmation::Confirmed(ConfirmedProject::new(
            config,
            parent,
            Placement::Fresh,
        )))
    }

    /// Apply the user's answer to a name conflict.
    ///
    /// Renaming re-checks the new name, so the result may be another
    /// conflict. Aborting returns [`ApplicationError::Aborted`] without
    /// touching the filesystem.
    pub fn resolve(
        &self,
        conflict: NameConflict,
        resolution: ConflictResolution,
    ) -> ForgeResult<Confirmation> {
        let (config, parent) = conflict.into_parts();
        match resolution {
            ConflictResolution::Overwrite => {
                warn!(project = %config.name(), "Existing directory will be overwritten");
                Ok(Confirmation::Confirmed(ConfirmedProject::new(
                    config,
                    parent,
                    Placement::Overwrite,
                )))
            }
            ConflictResolution::Rename(name) => {
                info!(from = %config.name(), to = %name, "Renaming project");
                self.confirm(config.renamed(name), parent)
            }
            ConflictResolution::Abort => Err(ApplicationError::Aborted.into()),
        }
    }

    /// Build and validate the plan for a checked project.
    pub fn plan(&self, project: &ConfirmedProject) -> ForgeResult<CompositionPlan> {
        let plan = CompositionPlanner::plan_confirmed(project);
        validator::validate_plan(&plan)?;
        Ok(plan)
    }

    /// Plan and emit a project.
    #[instrument(skip_all, fields(project = %project.config()))]
    pub fn generate(&self, project: &ConfirmedProject) -> ForgeResult<GenerationReport> {
        let plan = self.plan(project)?;
        self.emit(project, &plan)
    }

    /// Emit an already-built plan.
    pub fn emit(
        &self,
        project: &ConfirmedProject,
        plan: &CompositionPlan,
    ) -> ForgeResult<GenerationReport> {
        let run_id = Uuid::new_v4();
        info!(%run_id, steps = plan.steps().len(), "Generating project");
        Emitter::new(&*self.filesystem, &*self.package_manager, &self.cancel)
            .emit(run_id, project, plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::ports::{MockFilesystem, MockPackageManager},
        domain::{DependencyKind, LanguageVariant, PackageName, ProjectName},
        error::ForgeError,
    };
    use std::{
        collections::HashMap,
        path::PathBuf,
        sync::{Arc, Mutex},
    };

    fn config(name: &str) -> ProjectConfig {
        ProjectConfig::builder()
            .name(ProjectName::parse(name).unwrap())
            .language(LanguageVariant::TypeScript)
            .package(PackageName::parse("express").unwrap())
            .build()
            .unwrap()
    }

    fn quiet_package_manager() -> MockPackageManager {
        let mut pm = MockPackageManager::new();
        pm.expect_name().return_const("npm".to_string());
        pm.expect_install().returning(|_, _| Ok(()));
        pm
    }

    fn service(fs: MockFilesystem, pm: MockPackageManager) -> GenerateService {
        GenerateService::new(Box::new(fs), Box::new(pm))
    }

    fn confirmed(outcome: Confirmation) -> ConfirmedProject {
        match outcome {
            Confirmation::Confirmed(project) => project,
            Confirmation::Conflict(c) => panic!("unexpected conflict at {:?}", c.existing_path()),
        }
    }

    /// Filesystem mock that records writes and serves them back to reads.
    fn recording_filesystem(files: Arc<Mutex<HashMap<PathBuf, String>>>) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let writes = Arc::clone(&files);
        fs.expect_write_file().returning(move |path, content| {
            writes
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        });
        fs.expect_read_file().returning(move |path| {
            Ok(files.lock().unwrap().get(path).cloned().unwrap_or_default())
        });
        fs
    }

    #[test]
    fn confirm_fresh_directory() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p == Path::new("/out/demo-app"))
            .return_const(false);
        let svc = service(fs, MockPackageManager::new());

        let project = confirmed(svc.confirm(config("demo-app"), "/out").unwrap());
        assert_eq!(project.placement(), Placement::Fresh);
        assert_eq!(project.root(), PathBuf::from("/out/demo-app"));
    }

    #[test]
    fn existing_directory_is_a_conflict() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        let svc = service(fs, MockPackageManager::new());

        let outcome = svc.confirm(config("demo-app"), "/out").unwrap();
        assert!(matches!(outcome, Confirmation::Conflict(_)));
    }

    #[test]
    fn abort_touches_nothing() {
        // No create/write/remove expectations: any mutation panics.
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        let svc = service(fs, MockPackageManager::new());

        let Confirmation::Conflict(conflict) = svc.confirm(config("demo-app"), "/out").unwrap()
        else {
            panic!("expected conflict");
        };
        let err = svc.resolve(conflict, ConflictResolution::Abort).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::Aborted)
        ));
    }

    #[test]
    fn rename_rechecks_and_plans_with_new_name() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p == Path::new("/out/demo-app"))
            .return_const(true);
        fs.expect_exists()
            .withf(|p| p == Path::new("/out/demo-app-new"))
            .return_const(false);
        let svc = service(fs, MockPackageManager::new());

        let Confirmation::Conflict(conflict) = svc.confirm(config("demo-app"), "/out").unwrap()
        else {
            panic!("expected conflict");
        };
        let new_name = conflict.suggested_name().unwrap();
        let project = confirmed(
            svc.resolve(conflict, ConflictResolution::Rename(new_name))
                .unwrap(),
        );
        assert_eq!(project.root(), PathBuf::from("/out/demo-app-new"));

        let plan = svc.plan(&project).unwrap();
        let manifest = plan.artifact("package.json").and_then(|a| a.text()).unwrap();
        assert!(manifest.contains("\"demo-app-new\""));
    }

    #[test]
    fn rename_can_conflict_again() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        let svc = service(fs, MockPackageManager::new());

        let Confirmation::Conflict(conflict) = svc.confirm(config("demo-app"), "/out").unwrap()
        else {
            panic!("expected conflict");
        };
        let again = svc
            .resolve(
                conflict,
                ConflictResolution::Rename(ProjectName::parse("taken").unwrap()),
            )
            .unwrap();
        assert!(matches!(again, Confirmation::Conflict(c) if c.config().name().as_str() == "taken"));
    }

    #[test]
    fn generate_writes_files_and_amends_manifest() {
        let files = Arc::new(Mutex::new(HashMap::new()));
        let svc = service(
            recording_filesystem(Arc::clone(&files)),
            quiet_package_manager(),
        );

        let project = confirmed(svc.confirm(config("demo-app"), "/out").unwrap());
        let report = svc.generate(&project).unwrap();
        assert_eq!(report.install_steps, 2);

        let files = files.lock().unwrap();
        let manifest = &files[&PathBuf::from("/out/demo-app/package.json")];
        let value: serde_json::Value = serde_json::from_str(manifest).unwrap();
        assert_eq!(value["name"], "demo-app");
        assert_eq!(value["type"], "module");
        assert_eq!(value["scripts"]["build"], "tsc");
        assert!(files.contains_key(&PathBuf::from("/out/demo-app/src/server.ts")));
        assert_eq!(files.len(), report.files);
    }

    #[test]
    fn install_failure_stops_and_rolls_back() {
        let written = Arc::new(Mutex::new(Vec::new()));
        let mut fs = MockFilesystem::new();
        let exists_calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&exists_calls);
        // Fresh at confirm and emit time; present when rolling back.
        fs.expect_exists().returning(move |_| {
            let mut n = counter.lock().unwrap();
            *n += 1;
            *n > 2
        });
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let log = Arc::clone(&written);
        fs.expect_write_file().returning(move |path, _| {
            log.lock().unwrap().push(path.to_path_buf());
            Ok(())
        });
        fs.expect_remove_dir_all()
            .withf(|p| p == Path::new("/out/demo-app"))
            .times(1)
            .returning(|_| Ok(()));

        let mut pm = MockPackageManager::new();
        pm.expect_name().return_const("npm".to_string());
        pm.expect_install()
            .withf(|_, step| step.kind == DependencyKind::Runtime)
            .times(1)
            .returning(|_, _| {
                Err(ApplicationError::ExternalToolFailure {
                    tool: "npm".into(),
                    command: "npm install express".into(),
                    reason: "exit status 1".into(),
                }
                .into())
            });

        let svc = service(fs, pm);
        let project = confirmed(svc.confirm(config("demo-app"), "/out").unwrap());
        let err = svc.generate(&project).unwrap_err();

        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::ExternalToolFailure { .. })
        ));
        // Only the initial manifest precedes the first install step.
        assert_eq!(
            *written.lock().unwrap(),
            vec![PathBuf::from("/out/demo-app/package.json")]
        );
    }

    #[test]
    fn overwrite_removes_existing_directory_first() {
        let files = Arc::new(Mutex::new(HashMap::new()));
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_remove_dir_all().times(1).returning(|_| Ok(()));
        fs.expect_create_dir_all().returning(|_| Ok(()));
        let writes = Arc::clone(&files);
        fs.expect_write_file().returning(move |path, content| {
            writes
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        });
        let reads = Arc::clone(&files);
        fs.expect_read_file().returning(move |path: &Path| {
            Ok(reads.lock().unwrap().get(path).cloned().unwrap_or_default())
        });

        let svc = service(fs, quiet_package_manager());
        let Confirmation::Conflict(conflict) = svc.confirm(config("demo-app"), "/out").unwrap()
        else {
            panic!("expected conflict");
        };
        let project = confirmed(svc.resolve(conflict, ConflictResolution::Overwrite).unwrap());
        assert_eq!(project.placement(), Placement::Overwrite);
        svc.generate(&project).unwrap();
    }

    #[test]
    fn cancellation_aborts_before_first_step() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().times(1).returning(|_| Ok(()));

        let flag = CancelFlag::new();
        let svc = service(fs, MockPackageManager::new()).with_cancel_flag(flag.clone());
        let project = confirmed(svc.confirm(config("demo-app"), "/out").unwrap());

        flag.cancel();
        let err = svc.generate(&project).unwrap_err();
        assert!(err.is_interruption());
    }
}
