//! `zephyrww list`: list installed versions.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::registry;

/// Run the list command.
///
/// # Errors
///
/// Returns an error if the installation home cannot be read.
pub fn run(app: &AppContext) -> Result<()> {
    let versions = registry::list(&app.fs, &app.home)?;
    app.renderer().render_list(&app.home, &versions)
}
