//! Unit tests for `ensure_installed`: idempotency and version resolution.

#![allow(clippy::expect_used)]

use anyhow::Result;
use zephyrww_cli::application::ports::LocalFs as _;
use zephyrww_cli::application::services::ensure::{
    EnsureOptions, EnsureOutcome, ensure_installed, resolve_version,
};
use zephyrww_cli::application::services::provision::StepOutput;
use zephyrww_cli::application::services::registry::InstallStatus;
use zephyrww_cli::domain::InstallError;

use crate::helpers::{home, start_dir, tools};
use crate::mocks::{
    MemFs, MockReleases, MockWorkdir, RecordingReporter, RecordingRunner, no_releases,
};

async fn ensure(
    runner: &RecordingRunner<'_>,
    fs: &MemFs,
    workdir: &MockWorkdir,
    releases: &MockReleases,
    requested: &str,
) -> Result<EnsureOutcome> {
    let tools = tools();
    ensure_installed(
        runner,
        fs,
        workdir,
        releases,
        &RecordingReporter::default(),
        EnsureOptions {
            home: &home(),
            requested,
            tools: &tools,
            output: StepOutput::Inherit,
        },
    )
    .await
}

#[tokio::test]
async fn test_existing_root_performs_no_invocations() {
    let fs = MemFs::with_dirs(&[home().join("v3.7.0")]);
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);

    let outcome = ensure(&runner, &fs, &workdir, &no_releases(), "v3.7.0")
        .await
        .expect("ensure succeeds");

    assert!(matches!(
        outcome,
        EnsureOutcome::AlreadyInstalled {
            status: InstallStatus::Partial,
            ..
        }
    ));
    assert!(runner.calls.borrow().is_empty());
    assert!(fs.created.borrow().is_empty());
    assert!(workdir.visited.borrow().is_empty());
}

#[tokio::test]
async fn test_second_ensure_is_a_no_op() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);

    let first = ensure(&runner, &fs, &workdir, &no_releases(), "v3.7.0")
        .await
        .expect("first ensure");
    assert!(matches!(first, EnsureOutcome::Installed(_)));
    let calls_after_first = runner.calls.borrow().len();

    let second = ensure(&runner, &fs, &workdir, &no_releases(), "v3.7.0")
        .await
        .expect("second ensure");
    assert!(matches!(
        second,
        EnsureOutcome::AlreadyInstalled {
            status: InstallStatus::Complete,
            ..
        }
    ));
    assert_eq!(runner.calls.borrow().len(), calls_after_first);
}

#[tokio::test]
async fn test_invalid_version_creates_no_directory() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);

    let err = ensure(&runner, &fs, &workdir, &no_releases(), "3.7.0")
        .await
        .expect_err("invalid version");

    let install_err = err.downcast_ref::<InstallError>().expect("typed error");
    assert_eq!(install_err.code(), "invalid-version");
    assert!(fs.created.borrow().is_empty());
    assert!(!fs.exists(&home().join("3.7.0")));
    assert!(runner.calls.borrow().is_empty());
}

#[tokio::test]
async fn test_failed_install_surfaces_typed_error() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::failing_at(&fs, &workdir, 4, 3);

    let err = ensure(&runner, &fs, &workdir, &no_releases(), "v3.7.0")
        .await
        .expect_err("sdk install fails");

    let install_err = err.downcast_ref::<InstallError>().expect("typed error");
    assert_eq!(install_err.code(), "step-failed");
    assert_eq!(workdir.cwd(), start_dir());
}

#[tokio::test]
async fn test_latest_resolves_through_release_index() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);
    let mut releases = MockReleases::new();
    releases
        .expect_latest_tag()
        .times(1)
        .returning(|| Ok("v4.0.0".to_string()));

    let outcome = ensure(&runner, &fs, &workdir, &releases, "latest")
        .await
        .expect("ensure succeeds");

    let EnsureOutcome::Installed(report) = outcome else {
        panic!("expected a fresh install");
    };
    assert_eq!(report.version.as_str(), "v4.0.0");
    assert!(fs.is_dir(&home().join("v4.0.0").join("zephyr-sdk")));
}

#[tokio::test]
async fn test_resolve_version_passes_explicit_tags_through() {
    let version = resolve_version(&no_releases(), "v3.6.0")
        .await
        .expect("valid");
    assert_eq!(version.as_str(), "v3.6.0");
}

#[tokio::test]
async fn test_resolve_version_rejects_unprefixed_latest_tag() {
    let mut releases = MockReleases::new();
    releases
        .expect_latest_tag()
        .returning(|| Ok("4.0.0".to_string()));

    let err = resolve_version(&releases, "latest")
        .await
        .expect_err("unprefixed tag");
    assert!(err.downcast_ref::<InstallError>().is_some());
}

#[tokio::test]
async fn test_resolve_version_propagates_network_errors() {
    let mut releases = MockReleases::new();
    releases
        .expect_latest_tag()
        .returning(|| Err(anyhow::anyhow!("connection refused")));

    let err = resolve_version(&releases, "latest")
        .await
        .expect_err("network failure");
    assert!(format!("{err:#}").contains("connection refused"));
}
