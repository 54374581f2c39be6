//! `zephyrww latest`: show the latest published Zephyr release.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::ensure::resolve_version;
use crate::domain::version::LATEST_KEYWORD;
use crate::output::progress;

/// Run the latest command.
///
/// # Errors
///
/// Returns an error if the release index cannot be reached or returns a tag
/// that is not a valid version.
pub async fn run(app: &AppContext) -> Result<()> {
    let config = app.config()?;
    let releases = app.release_index(&config);

    let spinner = app
        .output
        .show_progress()
        .then(|| progress::spinner("fetching latest release..."));
    let resolved = resolve_version(&releases, LATEST_KEYWORD).await;
    if let Some(pb) = &spinner {
        match &resolved {
            Ok(_) => progress::finish_ok(pb, "fetched latest release"),
            Err(_) => progress::finish_error(pb),
        }
    }

    app.renderer().render_latest(resolved?.as_str())
}
