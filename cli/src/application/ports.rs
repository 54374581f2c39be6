//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`; never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;

use crate::domain::ZephyrwwConfig;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
///
/// Programs run in the process working directory; callers that need a
/// different directory change it first (see `WorkingDirectory`).
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or awaited. A
    /// non-zero exit is not an error; inspect `Output::status`.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with inherited stdio and return only its exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or awaited.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait; no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Filesystem Ports ──────────────────────────────────────────────────────────

/// Abstracts the local filesystem operations used by the installer.
pub trait LocalFs {
    /// Whether `path` exists (file, directory, or anything else).
    fn exists(&self, path: &Path) -> bool;
    /// Whether `path` is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;
    /// Create `path` and its parents; succeeds if it already exists.
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    /// Recursively remove a directory.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;
    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> Result<()>;
    /// Names of the immediate child directories of `path`.
    fn child_dirs(&self, path: &Path) -> Result<Vec<String>>;
}

/// The process-wide current working directory.
pub trait WorkingDirectory {
    /// Current working directory.
    fn current(&self) -> Result<PathBuf>;
    /// Change the current working directory.
    fn change_to(&self, path: &Path) -> Result<()>;
}

// ── Release Index Port ────────────────────────────────────────────────────────

/// Remote index of Zephyr releases.
#[allow(async_fn_in_trait)]
pub trait ReleaseIndex {
    /// Fetch the tag of the latest published release.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, an unparseable response, or a tag
    /// that does not start with `v`.
    async fn latest_tag(&self) -> Result<String>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the config, returning defaults when no file exists.
    fn load(&self) -> Result<ZephyrwwConfig>;
    /// Persist the config.
    fn save(&self, config: &ZephyrwwConfig) -> Result<()>;
    /// Location of the config file.
    fn path(&self) -> &Path;
}
