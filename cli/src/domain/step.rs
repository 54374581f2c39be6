//! The provisioning state machine.
//!
//! Steps are pure data: each maps to either an external command line or the
//! final config cleanup. Executing them is the job of
//! `application::services::provision`.

use std::fmt;
use std::path::PathBuf;

use crate::domain::layout::InstallPaths;
use crate::domain::version::ZephyrVersion;

/// Package name of the workspace tool installed for the duration of a run.
pub const WEST_PACKAGE: &str = "west";

/// One provisioning step, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvisionStep {
    BootstrapInstall,
    WorkspaceInit,
    WorkspaceSync,
    DependencyInstall,
    SdkInstall,
    BootstrapRemove,
    ConfigCleanup,
}

/// How a step failure affects the rest of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Halt the sequence and report the step.
    Fatal,
    /// Log a warning and keep the verdict of earlier steps.
    BestEffort,
}

impl ProvisionStep {
    /// Total order of the install sequence.
    pub const SEQUENCE: [Self; 7] = [
        Self::BootstrapInstall,
        Self::WorkspaceInit,
        Self::WorkspaceSync,
        Self::DependencyInstall,
        Self::SdkInstall,
        Self::BootstrapRemove,
        Self::ConfigCleanup,
    ];

    /// Stable kebab-case identifier used in errors and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BootstrapInstall => "bootstrap-install",
            Self::WorkspaceInit => "workspace-init",
            Self::WorkspaceSync => "workspace-sync",
            Self::DependencyInstall => "dependency-install",
            Self::SdkInstall => "sdk-install",
            Self::BootstrapRemove => "bootstrap-remove",
            Self::ConfigCleanup => "config-cleanup",
        }
    }

    /// Progress message shown while the step runs.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::BootstrapInstall => "installing west...",
            Self::WorkspaceInit => "initializing west workspace...",
            Self::WorkspaceSync => "updating west projects...",
            Self::DependencyInstall => "installing west packages...",
            Self::SdkInstall => "installing Zephyr SDK...",
            Self::BootstrapRemove => "uninstalling west...",
            Self::ConfigCleanup => "cleaning up west config...",
        }
    }

    #[must_use]
    pub fn severity(self) -> Severity {
        match self {
            Self::ConfigCleanup => Severity::BestEffort,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Programs and manifest used to drive the workspace tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// `pip` executable of the active environment.
    pub pip: String,
    /// `west` executable installed by the bootstrap step.
    pub west: String,
    /// Git URL of the Zephyr manifest repository.
    pub manifest_url: String,
}

/// A fully resolved external command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl StepCommand {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Printable command line for logs.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// What executing a step means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Run an external program; non-zero exit is failure.
    Command(StepCommand),
    /// Remove the workspace config path (file or directory) if present.
    RemoveConfig(PathBuf),
}

/// Resolve the action for `step`.
#[must_use]
pub fn plan(
    step: ProvisionStep,
    tools: &ToolSettings,
    paths: &InstallPaths,
    version: &ZephyrVersion,
) -> StepAction {
    let pip = tools.pip.as_str();
    let west = tools.west.as_str();
    let cmd = match step {
        ProvisionStep::BootstrapInstall => StepCommand::new(pip, &["install", WEST_PACKAGE]),
        ProvisionStep::WorkspaceInit => StepCommand::new(
            west,
            &["init", "-m", &tools.manifest_url, "--mr", version.as_str(), "."],
        ),
        ProvisionStep::WorkspaceSync => StepCommand::new(west, &["update"]),
        ProvisionStep::DependencyInstall => {
            StepCommand::new(west, &["packages", "pip", "--install"])
        }
        ProvisionStep::SdkInstall => {
            let sdk = paths.sdk.to_string_lossy();
            StepCommand::new(west, &["sdk", "install", "--install-dir", &sdk])
        }
        ProvisionStep::BootstrapRemove => {
            StepCommand::new(pip, &["uninstall", WEST_PACKAGE, "-y"])
        }
        ProvisionStep::ConfigCleanup => return StepAction::RemoveConfig(paths.config.clone()),
    };
    StepAction::Command(cmd)
}
