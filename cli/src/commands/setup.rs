//! `zephyrww setup`: create the installation home and its virtual environment.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::setup::setup_home;

/// Run the setup command.
///
/// # Errors
///
/// Returns an error if the home cannot be created or `venv` fails.
pub async fn run(app: &AppContext) -> Result<()> {
    let config = app.config()?;
    let reporter = app.terminal_reporter();
    let outcome = setup_home(
        &app.runner,
        &app.fs,
        &reporter,
        &app.home,
        &config.tools.python,
    )
    .await?;
    app.renderer().render_setup(&app.home, outcome)
}
