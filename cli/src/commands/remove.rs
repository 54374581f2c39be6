//! `zephyrww remove <version>`: delete an installation root.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::registry;
use crate::application::services::removal::remove_installation;
use crate::domain::version::ZephyrVersion;

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Zephyr release tag (e.g. v3.7.0)
    #[arg(id = "tag", value_name = "VERSION")]
    pub version: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Run the remove command.
///
/// # Errors
///
/// Returns an error if the version is invalid, the prompt fails, or the
/// directory cannot be removed.
pub fn run(app: &AppContext, args: &RemoveArgs) -> Result<()> {
    let version = ZephyrVersion::parse(&args.version)?;

    if registry::exists(&app.fs, &app.home, &version) {
        let root = registry::paths(&app.home, &version).root;
        let prompt = format!("Delete {}?", root.display());
        if !app.confirm(&prompt, false)? {
            app.output.info("Aborted");
            return Ok(());
        }
    }

    let removed = remove_installation(&app.fs, &app.terminal_reporter(), &app.home, &version)?;
    app.renderer().render_remove(version.as_str(), removed)
}
