//! Application service: provision one Zephyr version.
//!
//! Runs the fixed step sequence from `domain::step` inside the installation
//! root. Imports only from `crate::domain` and `crate::application`; all I/O
//! goes through injected ports.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter, WorkingDirectory};
use crate::application::services::workdir::WorkdirGuard;
use crate::domain::error::{CleanupWarning, InstallError, StepExit};
use crate::domain::layout::InstallPaths;
use crate::domain::step::{self, ProvisionStep, Severity, StepAction, StepCommand, ToolSettings};
use crate::domain::version::ZephyrVersion;

/// Lines of captured stderr shown when a quiet step fails.
const STDERR_TAIL_LINES: usize = 10;

/// Where external step output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StepOutput {
    /// Stream to the terminal.
    #[default]
    Inherit,
    /// Capture; show the stderr tail only on failure.
    Capture,
}

pub struct InstallOptions<'a> {
    pub home: &'a Path,
    pub version: &'a str,
    pub tools: &'a ToolSettings,
    pub output: StepOutput,
}

/// Result of a completed install.
#[derive(Debug)]
pub struct InstallReport {
    pub version: ZephyrVersion,
    pub paths: InstallPaths,
    /// Best-effort steps that failed without failing the install.
    pub warnings: Vec<CleanupWarning>,
}

/// Provision `opts.version` under `opts.home`.
///
/// The caller is responsible for checking that the version is not already
/// installed. The working directory is restored before this returns, whatever
/// the outcome. Completed steps are never rolled back.
///
/// # Errors
///
/// - [`InstallError::InvalidVersion`] before anything is touched.
/// - [`InstallError::InvalidHome`] if a relative home cannot be anchored.
/// - [`InstallError::DirectoryCreateFailed`] / [`InstallError::ChdirFailed`]
///   while staging.
/// - [`InstallError::StepFailed`] for the first fatal step that fails; no
///   later step runs.
pub async fn install(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    workdir: &impl WorkingDirectory,
    reporter: &impl ProgressReporter,
    opts: InstallOptions<'_>,
) -> Result<InstallReport, InstallError> {
    let version = ZephyrVersion::parse(opts.version)?;
    let home = anchored_home(workdir, opts.home)?;
    let paths = InstallPaths::new(&home, &version);
    tracing::info!(version = %version, root = %paths.root.display(), "provisioning installation");

    fs.create_dir_all(&paths.root)
        .map_err(|e| InstallError::DirectoryCreateFailed {
            path: paths.root.clone(),
            reason: format!("{e:#}"),
        })?;

    let _cwd = WorkdirGuard::enter(workdir, &paths.root)?;

    let mut warnings = Vec::new();
    for current in ProvisionStep::SEQUENCE {
        reporter.step(current.description());
        let action = step::plan(current, opts.tools, &paths, &version);
        let Err(exit) = execute(runner, fs, reporter, action, opts.output).await else {
            tracing::debug!(step = current.name(), "step completed");
            continue;
        };
        match current.severity() {
            Severity::Fatal => {
                tracing::error!(step = current.name(), exit = %exit, "provisioning halted");
                return Err(InstallError::StepFailed {
                    step: current,
                    exit,
                });
            }
            Severity::BestEffort => {
                let warning = CleanupWarning {
                    step: current,
                    exit,
                };
                tracing::warn!(step = current.name(), "{warning}");
                reporter.warn(&warning.to_string());
                warnings.push(warning);
            }
        }
    }

    Ok(InstallReport {
        version,
        paths,
        warnings,
    })
}

/// Step paths are used after S1 changes directory, so they must not be
/// relative to the caller's working directory.
fn anchored_home(workdir: &impl WorkingDirectory, home: &Path) -> Result<PathBuf, InstallError> {
    if home.is_absolute() {
        return Ok(home.to_path_buf());
    }
    let cwd = workdir
        .current()
        .map_err(|e| InstallError::InvalidHome {
            path: home.to_path_buf(),
            reason: format!("{e:#}"),
        })?;
    Ok(cwd.join(home))
}

async fn execute(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    action: StepAction,
    output: StepOutput,
) -> Result<(), StepExit> {
    match action {
        StepAction::Command(cmd) => run_command(runner, reporter, &cmd, output).await,
        StepAction::RemoveConfig(path) => {
            remove_config(fs, &path).map_err(|e| StepExit::Io(format!("{e:#}")))
        }
    }
}

/// Run one external step. Only the exit status decides success.
async fn run_command(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    cmd: &StepCommand,
    output: StepOutput,
) -> Result<(), StepExit> {
    let args: Vec<&str> = cmd.args.iter().map(String::as_str).collect();
    tracing::debug!(command = %cmd.display(), "running");

    let status = match output {
        StepOutput::Inherit => runner.run_status(&cmd.program, &args).await,
        StepOutput::Capture => runner.run(&cmd.program, &args).await.map(|out| {
            if !out.status.success() {
                let stderr = String::from_utf8_lossy(&out.stderr);
                let tail = stderr_tail(&stderr, STDERR_TAIL_LINES);
                if !tail.is_empty() {
                    reporter.warn(&tail);
                }
            }
            out.status
        }),
    }
    .map_err(|e| StepExit::Launch(format!("{e:#}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(status.code().map_or(StepExit::Terminated, StepExit::Code))
    }
}

/// Remove the workspace config whether it is a directory or a file.
fn remove_config(fs: &impl LocalFs, path: &Path) -> Result<()> {
    if fs.is_dir(path) {
        fs.remove_dir_all(path)
    } else if fs.exists(path) {
        fs.remove_file(path)
    } else {
        Ok(())
    }
}

fn stderr_tail(stderr: &str, lines: usize) -> String {
    let all: Vec<&str> = stderr.trim_end().lines().collect();
    all[all.len().saturating_sub(lines)..].join("\n")
}
