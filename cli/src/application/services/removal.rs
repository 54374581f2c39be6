//! Application service: remove an installation root.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{LocalFs, ProgressReporter};
use crate::application::services::registry;
use crate::domain::version::ZephyrVersion;

/// Delete the installation root of `version`.
///
/// Returns `false` when nothing was installed. Used to clear a partial
/// install before retrying.
///
/// # Errors
///
/// Returns an error if the directory cannot be removed.
pub fn remove_installation(
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    home: &Path,
    version: &ZephyrVersion,
) -> Result<bool> {
    if !registry::exists(fs, home, version) {
        return Ok(false);
    }
    let root = registry::paths(home, version).root;
    reporter.step(&format!("removing {}...", root.display()));
    fs.remove_dir_all(&root)?;
    tracing::info!(version = %version, root = %root.display(), "removed installation");
    Ok(true)
}
