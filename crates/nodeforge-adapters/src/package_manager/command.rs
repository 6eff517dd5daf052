//! Runs npm, pnpm or yarn as a child process.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use nodeforge_core::{
    application::{ApplicationError, CancelFlag, ports::PackageManager},
    domain::InstallStep,
    error::{ForgeError, ForgeResult},
};
use tracing::{debug, info, warn};

use super::PackageManagerKind;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const STDERR_TAIL_LINES: usize = 5;

/// Blocking, cancellable package-manager invocation.
///
/// Output goes to an anonymous temp file so a chatty tool can never fill a
/// pipe and stall; the last lines of stderr become the failure reason.
#[derive(Debug, Clone)]
pub struct CommandPackageManager {
    kind: PackageManagerKind,
    program: String,
    cancel: CancelFlag,
}

impl CommandPackageManager {
    pub fn new(kind: PackageManagerKind, cancel: CancelFlag) -> Self {
        Self {
            kind,
            program: kind.program(),
            cancel,
        }
    }

    /// Override the executable, keeping `kind`'s argument style.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn kind(&self) -> PackageManagerKind {
        self.kind
    }

    fn failure(&self, command: &str, reason: impl Into<String>) -> ForgeError {
        ApplicationError::ExternalToolFailure {
            tool: self.kind.to_string(),
            command: command.to_string(),
            reason: reason.into(),
        }
        .into()
    }

    /// Wait for the child, killing it if the cancel flag is raised.
    fn wait(&self, child: &mut Child, command: &str) -> ForgeResult<ExitStatus> {
        loop {
            if self.cancel.is_cancelled() {
                warn!(command, "Cancelling package manager");
                // The child may already have exited; either way it is gone.
                let _ = child.kill();
                let _ = child.wait();
                return Err(ApplicationError::Cancelled.into());
            }
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(self.failure(command, e.to_string())),
            }
        }
    }
}

impl PackageManager for CommandPackageManager {
    fn name(&self) -> String {
        self.kind.to_string()
    }

    fn install(&self, project_root: &Path, step: &InstallStep) -> ForgeResult<()> {
        let args = self.kind.install_args(step);
        let command = format!("{} {}", self.program, args.join(" "));
        info!(%command, cwd = %project_root.display(), "Running package manager");

        let mut output = tempfile::tempfile().map_err(|e| self.failure(&command, e.to_string()))?;
        let stdout = output
            .try_clone()
            .map_err(|e| self.failure(&command, e.to_string()))?;
        let stderr = output
            .try_clone()
            .map_err(|e| self.failure(&command, e.to_string()))?;

        let mut child = Command::new(&self.program)
            .args(&args)
            .current_dir(project_root)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .spawn()
            .map_err(|e| self.failure(&command, format!("could not start: {e}")))?;

        let status = self.wait(&mut child, &command)?;
        if status.success() {
            debug!(%command, "Package manager finished");
            return Ok(());
        }

        let tail = read_tail(&mut output);
        Err(self.failure(&command, format!("{status}{tail}")))
    }
}

/// Last few lines of captured output, prefixed for appending to a message.
fn read_tail(file: &mut File) -> String {
    let mut text = String::new();
    if file.seek(SeekFrom::Start(0)).is_err() || file.read_to_string(&mut text).is_err() {
        return String::new();
    }
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    if lines.is_empty() {
        String::new()
    } else {
        format!("\n{}", lines[start..].join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodeforge_core::domain::DependencyKind;

    fn step() -> InstallStep {
        InstallStep {
            kind: DependencyKind::Runtime,
            packages: vec!["express".into()],
        }
    }

    #[test]
    fn missing_binary_is_an_external_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let pm = CommandPackageManager::new(PackageManagerKind::Npm, CancelFlag::new())
            .with_program("nodeforge-test-missing-binary");

        let err = pm.install(dir.path(), &step()).unwrap_err();
        match err {
            ForgeError::Application(ApplicationError::ExternalToolFailure {
                tool, command, ..
            }) => {
                assert_eq!(tool, "npm");
                assert_eq!(command, "nodeforge-test-missing-binary install express");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_failure() {
        let dir = tempfile::tempdir().unwrap();
        let pm = CommandPackageManager::new(PackageManagerKind::Npm, CancelFlag::new())
            .with_program("false");
        assert!(pm.install(dir.path(), &step()).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_succeeds() {
        let dir = tempfile::tempdir().unwrap();
        let pm = CommandPackageManager::new(PackageManagerKind::Yarn, CancelFlag::new())
            .with_program("true");
        pm.install(dir.path(), &step()).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn raised_flag_cancels() {
        let dir = tempfile::tempdir().unwrap();
        let flag = CancelFlag::new();
        flag.cancel();
        let pm = CommandPackageManager::new(PackageManagerKind::Npm, flag).with_program("true");
        let err = pm.install(dir.path(), &step()).unwrap_err();
        assert!(err.is_interruption());
    }

    #[test]
    fn tail_keeps_last_lines() {
        use std::io::Write;
        let mut file = tempfile::tempfile().unwrap();
        for i in 0..10 {
            writeln!(file, "line {i}").unwrap();
        }
        let tail = read_tail(&mut file);
        assert!(tail.starts_with("\nline 5"));
        assert!(tail.ends_with("line 9"));
    }
}
