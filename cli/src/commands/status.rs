//! `zephyrww status <version>`: show the state of one installation.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::registry::{self, InstalledVersion};
use crate::domain::version::ZephyrVersion;

/// Arguments for the status command.
#[derive(Args)]
pub struct StatusArgs {
    /// Zephyr release tag (e.g. v3.7.0)
    #[arg(id = "tag", value_name = "VERSION")]
    pub version: String,
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if the version is invalid.
pub fn run(app: &AppContext, args: &StatusArgs) -> Result<()> {
    let version = ZephyrVersion::parse(&args.version)?;
    let installed = InstalledVersion {
        status: registry::status(&app.fs, &app.home, &version),
        paths: registry::paths(&app.home, &version),
        version: version.to_string(),
    };
    app.renderer().render_status(&installed)
}
