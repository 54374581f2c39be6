//! `zephyrww ensure`: install a Zephyr version unless it is already present.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::ensure::{self, EnsureOptions};

/// Arguments for the ensure command.
#[derive(Args)]
pub struct EnsureArgs {
    /// Zephyr release tag (e.g. v3.7.0), or `latest`
    #[arg(long = "zephyr-version", value_name = "VERSION")]
    pub zephyr_version: String,
}

/// Run the ensure command.
///
/// # Errors
///
/// Returns an [`InstallError`](crate::domain::InstallError) for an invalid
/// version or a failed provisioning step, or an error if `latest` cannot be
/// resolved.
pub async fn run(app: &AppContext, args: &EnsureArgs) -> Result<()> {
    let config = app.config()?;
    let tools = app.tool_settings(&config);
    let releases = app.release_index(&config);
    let reporter = app.terminal_reporter();

    let outcome = ensure::ensure_installed(
        &app.runner,
        &app.fs,
        &app.workdir,
        &releases,
        &reporter,
        EnsureOptions {
            home: &app.home,
            requested: &args.zephyr_version,
            tools: &tools,
            output: app.step_output(),
        },
    )
    .await?;

    app.renderer().render_ensure(&outcome)
}
