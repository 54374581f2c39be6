//! Application service: ensure a Zephyr version is installed.
//!
//! Validates the request, consults the registry, and provisions only when the
//! installation root is absent.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::{
    CommandRunner, LocalFs, ProgressReporter, ReleaseIndex, WorkingDirectory,
};
use crate::application::services::provision::{self, InstallOptions, InstallReport, StepOutput};
use crate::application::services::registry::{self, InstallStatus};
use crate::domain::step::ToolSettings;
use crate::domain::version::{LATEST_KEYWORD, ZephyrVersion};

pub struct EnsureOptions<'a> {
    pub home: &'a Path,
    /// A tag such as `v3.7.0`, or `latest`.
    pub requested: &'a str,
    pub tools: &'a ToolSettings,
    pub output: StepOutput,
}

/// Outcome of the `ensure_installed` use-case.
#[derive(Debug)]
pub enum EnsureOutcome {
    /// An installation root already existed; nothing was run.
    AlreadyInstalled {
        version: ZephyrVersion,
        status: InstallStatus,
    },
    /// The version was provisioned by this call.
    Installed(InstallReport),
}

/// Turn the user's request into a validated version.
///
/// # Errors
///
/// Returns an error if the latest tag cannot be fetched, or the version does
/// not start with `v`.
pub async fn resolve_version(
    releases: &impl ReleaseIndex,
    requested: &str,
) -> Result<ZephyrVersion> {
    if requested == LATEST_KEYWORD {
        let tag = releases
            .latest_tag()
            .await
            .context("resolving latest Zephyr release")?;
        tracing::info!(tag = %tag, "resolved latest release");
        return Ok(ZephyrVersion::parse(&tag)?);
    }
    Ok(ZephyrVersion::parse(requested)?)
}

/// Install the requested version unless an installation root already exists.
///
/// # Errors
///
/// Returns an [`InstallError`](crate::domain::InstallError) (wrapped in
/// `anyhow`) for invalid input or a failed install, or a resolution error
/// when `latest` cannot be fetched.
pub async fn ensure_installed(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    workdir: &impl WorkingDirectory,
    releases: &impl ReleaseIndex,
    reporter: &impl ProgressReporter,
    opts: EnsureOptions<'_>,
) -> Result<EnsureOutcome> {
    let version = resolve_version(releases, opts.requested).await?;

    if registry::exists(fs, opts.home, &version) {
        let status = registry::status(fs, opts.home, &version);
        tracing::info!(version = %version, status = status.as_str(), "installation exists, skipping");
        return Ok(EnsureOutcome::AlreadyInstalled { version, status });
    }

    reporter.step(&format!("installing Zephyr {version}..."));
    let report = provision::install(
        runner,
        fs,
        workdir,
        reporter,
        InstallOptions {
            home: opts.home,
            version: version.as_str(),
            tools: opts.tools,
            output: opts.output,
        },
    )
    .await?;
    Ok(EnsureOutcome::Installed(report))
}
