//! Scoped working-directory change.

use std::path::{Path, PathBuf};

use crate::application::ports::WorkingDirectory;
use crate::domain::error::InstallError;

/// Holds the process inside another directory until dropped.
///
/// The previous directory is restored in `Drop`, so restoration happens on
/// normal return, on `?` early returns, and while unwinding.
pub struct WorkdirGuard<'a, W: WorkingDirectory> {
    workdir: &'a W,
    previous: PathBuf,
}

impl<'a, W: WorkingDirectory> WorkdirGuard<'a, W> {
    /// Remember the current directory and change into `target`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::ChdirFailed`] if the current directory cannot
    /// be read or `target` cannot be entered. Nothing is changed in that case.
    pub fn enter(workdir: &'a W, target: &Path) -> Result<Self, InstallError> {
        let chdir_failed = |e: anyhow::Error| InstallError::ChdirFailed {
            path: target.to_path_buf(),
            reason: format!("{e:#}"),
        };
        let previous = workdir.current().map_err(chdir_failed)?;
        workdir.change_to(target).map_err(chdir_failed)?;
        tracing::debug!(from = %previous.display(), to = %target.display(), "entered directory");
        Ok(Self { workdir, previous })
    }
}

impl<W: WorkingDirectory> Drop for WorkdirGuard<'_, W> {
    fn drop(&mut self) {
        match self.workdir.change_to(&self.previous) {
            Ok(()) => tracing::debug!(to = %self.previous.display(), "restored directory"),
            Err(e) => tracing::warn!(
                to = %self.previous.display(),
                error = %format!("{e:#}"),
                "failed to restore working directory"
            ),
        }
    }
}
