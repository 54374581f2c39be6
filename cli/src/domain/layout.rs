//! Installation tree layout.
//!
//! Pure path derivation; never touches the filesystem.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::version::ZephyrVersion;

/// Directory under the installation root that receives the Zephyr SDK.
pub const SDK_DIRNAME: &str = "zephyr-sdk";

/// Workspace config written by `west init`; removed once provisioning ends.
pub const WEST_CONFIG_DIRNAME: &str = ".west";

/// Python virtual environment under the installation home.
pub const VENV_DIRNAME: &str = ".venv";

/// Canonical paths of one versioned installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPaths {
    /// `<home>/<version>`
    pub root: PathBuf,
    /// `<root>/zephyr-sdk`
    pub sdk: PathBuf,
    /// `<root>/.west`
    pub config: PathBuf,
}

impl InstallPaths {
    #[must_use]
    pub fn new(home: &Path, version: &ZephyrVersion) -> Self {
        let root = home.join(version.as_str());
        Self {
            sdk: root.join(SDK_DIRNAME),
            config: root.join(WEST_CONFIG_DIRNAME),
            root,
        }
    }
}

/// Path of the home's virtual environment.
#[must_use]
pub fn venv_dir(home: &Path) -> PathBuf {
    home.join(VENV_DIRNAME)
}

/// Path of an executable inside a virtual environment.
#[must_use]
pub fn venv_bin(venv: &Path, program: &str) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts").join(format!("{program}.exe"))
    } else {
        venv.join("bin").join(program)
    }
}
