//! Release infrastructure: implements `ReleaseIndex` using the GitHub API.
//!
//! `ureq` is blocking, so the request runs under `spawn_blocking`.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::application::ports::ReleaseIndex;
use crate::domain::error::ReleaseError;
use crate::domain::version::VERSION_PREFIX;

/// Request timeout for the release index.
pub const RELEASE_TIMEOUT: Duration = Duration::from_secs(10);

/// GitHub requires a User-Agent on API requests.
const USER_AGENT: &str = concat!("zephyrww/", env!("CARGO_PKG_VERSION"));

/// Queries a GitHub `releases/latest` endpoint.
pub struct GithubReleaseIndex {
    url: String,
}

impl GithubReleaseIndex {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl ReleaseIndex for GithubReleaseIndex {
    async fn latest_tag(&self) -> Result<String> {
        let url = self.url.clone();
        tokio::task::spawn_blocking(move || fetch_latest_tag(&url))
            .await
            .map_err(|e| anyhow::anyhow!("spawn_blocking panicked: {e}"))?
    }
}

/// Blocking GET of `url`; runs on the blocking pool.
fn fetch_latest_tag(url: &str) -> Result<String> {
    tracing::debug!(url = %url, "fetching latest release");
    let response = ureq::get(url)
        .set("User-Agent", USER_AGENT)
        .set("Accept", "application/vnd.github+json")
        .timeout(RELEASE_TIMEOUT)
        .call()
        .with_context(|| format!("failed to fetch {url}"))?;

    let body = response
        .into_string()
        .context("failed to read release index response")?;
    parse_latest_tag(&body)
}

#[derive(Deserialize)]
struct LatestRelease {
    tag_name: Option<String>,
}

/// Extract `tag_name` from a `releases/latest` response body.
///
/// Tags without the `v` prefix are rejected rather than normalized.
pub(crate) fn parse_latest_tag(body: &str) -> Result<String> {
    let release: LatestRelease =
        serde_json::from_str(body).context("error parsing release index JSON")?;
    let tag = release.tag_name.ok_or(ReleaseError::MissingTag)?;
    if !tag.starts_with(VERSION_PREFIX) {
        return Err(ReleaseError::UnexpectedTag(tag).into());
    }
    Ok(tag)
}
