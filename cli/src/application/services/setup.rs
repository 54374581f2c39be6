//! Application service: prepare an installation home.
//!
//! Creates the home directory and its Python virtual environment. Both are
//! left untouched when they already exist.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::domain::layout::venv_dir;

/// What `setup_home` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupOutcome {
    pub home_created: bool,
    pub venv_created: bool,
}

/// Create `home` and `<home>/.venv` (via `<python> -m venv`) if missing.
///
/// # Errors
///
/// Returns an error if the home cannot be created, the interpreter cannot be
/// launched, or `venv` exits non-zero.
pub async fn setup_home(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    home: &Path,
    python: &str,
) -> Result<SetupOutcome> {
    let home_created = if fs.is_dir(home) {
        reporter.warn(&format!(
            "installation directory {} already exists",
            home.display()
        ));
        false
    } else {
        fs.create_dir_all(home)?;
        reporter.success(&format!("created {}", home.display()));
        true
    };

    let venv = venv_dir(home);
    if fs.is_dir(&venv) {
        reporter.warn(&format!(
            "virtual environment already exists at {}, skipping creation",
            venv.display()
        ));
        return Ok(SetupOutcome {
            home_created,
            venv_created: false,
        });
    }

    reporter.step("creating Python virtual environment...");
    let venv_arg = venv.to_string_lossy();
    let status = runner
        .run_status(python, &["-m", "venv", &venv_arg])
        .await
        .with_context(|| format!("running {python} -m venv"))?;
    anyhow::ensure!(
        status.success(),
        "{python} -m venv {} failed ({status})",
        venv.display()
    );
    tracing::info!(venv = %venv.display(), "created virtual environment");
    reporter.success(&format!("virtual environment ready at {}", venv.display()));

    Ok(SetupOutcome {
        home_created,
        venv_created: true,
    })
}
