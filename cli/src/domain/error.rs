//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs` or `std::process`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::domain::step::ProvisionStep;

// ── Install errors ────────────────────────────────────────────────────────────

/// How an external provisioning step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepExit {
    /// The program ran and exited with a non-zero code.
    Code(i32),
    /// The program was terminated without an exit code (e.g. by a signal).
    Terminated,
    /// The program could not be started.
    Launch(String),
    /// A filesystem action failed.
    Io(String),
}

impl fmt::Display for StepExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exited with status {code}"),
            Self::Terminated => f.write_str("was terminated by a signal"),
            Self::Launch(reason) => write!(f, "could not be started: {reason}"),
            Self::Io(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Errors raised while ensuring or provisioning an installation.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Invalid Zephyr version '{0}': versions must start with 'v' (e.g. v3.7.0).")]
    InvalidVersion(String),

    #[error("Installation home is not set. Pass --home or set ZEPHYRWW_HOME.")]
    MissingHome,

    #[error("Cannot resolve installation home {}: {reason}", .path.display())]
    InvalidHome { path: PathBuf, reason: String },

    #[error("Cannot create installation directory {}: {reason}", .path.display())]
    DirectoryCreateFailed { path: PathBuf, reason: String },

    #[error("Cannot enter installation directory {}: {reason}", .path.display())]
    ChdirFailed { path: PathBuf, reason: String },

    #[error("Provisioning step '{step}' {exit}.{}", hint(.step))]
    StepFailed { step: ProvisionStep, exit: StepExit },
}

fn hint(step: &ProvisionStep) -> &'static str {
    match step {
        ProvisionStep::BootstrapRemove => {
            " The SDK is installed but west was left in the environment."
        }
        _ => "",
    }
}

impl InstallError {
    /// Stable machine-readable code for `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidVersion(_) => "invalid-version",
            Self::MissingHome => "missing-home",
            Self::InvalidHome { .. } => "invalid-home",
            Self::DirectoryCreateFailed { .. } => "directory-create-failed",
            Self::ChdirFailed { .. } => "chdir-failed",
            Self::StepFailed { .. } => "step-failed",
        }
    }

    /// The failed step, for `StepFailed`.
    #[must_use]
    pub fn failed_step(&self) -> Option<ProvisionStep> {
        match self {
            Self::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }
}

/// A best-effort step that failed; logged and carried in the install report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupWarning {
    pub step: ProvisionStep,
    pub exit: StepExit,
}

impl fmt::Display for CleanupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.step, self.exit)
    }
}

// ── Release index errors ──────────────────────────────────────────────────────

/// Errors from resolving the latest release tag.
#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Release index response has no tag_name field.")]
    MissingTag,

    #[error("Unexpected tag format: {0}")]
    UnexpectedTag(String),
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\n{reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}
