//! Application service: installation registry.
//!
//! Answers "is this version installed?" and where its files live. Reads the
//! filesystem only through the `LocalFs` port and never mutates it.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::application::ports::LocalFs;
use crate::domain::layout::InstallPaths;
use crate::domain::version::{ZephyrVersion, compare_versions};

/// Diagnostic state of an installation root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallStatus {
    /// No installation root.
    Absent,
    /// Root exists but the west config is still present or the SDK is missing.
    Partial,
    /// Root exists, SDK present, west config removed.
    Complete,
}

impl InstallStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }
}

/// One versioned installation found under the home.
#[derive(Debug, Clone, Serialize)]
pub struct InstalledVersion {
    pub version: String,
    pub status: InstallStatus,
    #[serde(flatten)]
    pub paths: InstallPaths,
}

/// Canonical paths for `version` under `home`. Pure derivation.
#[must_use]
pub fn paths(home: &Path, version: &ZephyrVersion) -> InstallPaths {
    InstallPaths::new(home, version)
}

/// Whether an installation root for `version` exists.
///
/// Directory presence only: a partially provisioned root counts as installed.
#[must_use]
pub fn exists(fs: &impl LocalFs, home: &Path, version: &ZephyrVersion) -> bool {
    fs.is_dir(&paths(home, version).root)
}

/// Classify the installation root for `version`.
#[must_use]
pub fn status(fs: &impl LocalFs, home: &Path, version: &ZephyrVersion) -> InstallStatus {
    let paths = paths(home, version);
    if !fs.is_dir(&paths.root) {
        InstallStatus::Absent
    } else if fs.exists(&paths.config) || !fs.is_dir(&paths.sdk) {
        InstallStatus::Partial
    } else {
        InstallStatus::Complete
    }
}

/// All installation roots under `home`, oldest version first.
///
/// Child directories whose names are not valid versions (e.g. `.venv`) are
/// skipped. A missing home yields an empty list.
///
/// # Errors
///
/// Returns an error if the home exists but cannot be read.
pub fn list(fs: &impl LocalFs, home: &Path) -> Result<Vec<InstalledVersion>> {
    if !fs.is_dir(home) {
        return Ok(Vec::new());
    }
    let mut versions: Vec<ZephyrVersion> = fs
        .child_dirs(home)?
        .iter()
        .filter_map(|name| ZephyrVersion::parse(name).ok())
        .collect();
    versions.sort_by(compare_versions);
    Ok(versions
        .into_iter()
        .map(|v| InstalledVersion {
            status: status(fs, home, &v),
            paths: paths(home, &v),
            version: v.to_string(),
        })
        .collect())
}
