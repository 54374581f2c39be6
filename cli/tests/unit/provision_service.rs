//! Unit tests for the provisioning sequence.
//!
//! Verifies step order, failure containment, and working-directory
//! restoration using in-memory ports.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};

use anyhow::Result;
use serial_test::serial;
use zephyrww_cli::application::ports::{CommandRunner, LocalFs as _};
use zephyrww_cli::application::services::provision::{
    InstallOptions, InstallReport, StepOutput, install,
};
use zephyrww_cli::domain::{InstallError, InstallPaths, ProvisionStep, StepExit, ZephyrVersion};
use zephyrww_cli::infra::fs::{ProcessWorkingDir, StdFs};

use crate::helpers::{MANIFEST_URL, exit_status, home, start_dir, tools};
use crate::mocks::{MemFs, MockWorkdir, RecordingReporter, RecordingRunner};

fn paths(version: &str) -> InstallPaths {
    InstallPaths::new(&home(), &ZephyrVersion::parse(version).expect("valid"))
}

fn expected_commands(version: &str) -> Vec<String> {
    let sdk = paths(version).sdk;
    vec![
        "pip install west".to_string(),
        format!("west init -m {MANIFEST_URL} --mr {version} ."),
        "west update".to_string(),
        "west packages pip --install".to_string(),
        format!("west sdk install --install-dir {}", sdk.display()),
        "pip uninstall west -y".to_string(),
    ]
}

async fn run_install(
    runner: &RecordingRunner<'_>,
    fs: &MemFs,
    workdir: &MockWorkdir,
    reporter: &RecordingReporter,
    version: &str,
    output: StepOutput,
) -> Result<InstallReport, InstallError> {
    let tools = tools();
    install(
        runner,
        fs,
        workdir,
        reporter,
        InstallOptions {
            home: &home(),
            version,
            tools: &tools,
            output,
        },
    )
    .await
}

// ── Success ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_install_runs_steps_in_order_inside_root() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);
    let reporter = RecordingReporter::default();

    let report = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect("install succeeds");

    assert_eq!(runner.lines(), expected_commands("v3.7.0"));
    let root = paths("v3.7.0").root;
    assert!(runner.calls.borrow().iter().all(|c| c.cwd == root));
    assert!(report.warnings.is_empty());
    assert_eq!(report.version.as_str(), "v3.7.0");
}

#[tokio::test]
async fn test_install_end_to_end_leaves_sdk_and_removes_config() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);
    let reporter = RecordingReporter::default();

    let report = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect("install succeeds");

    assert!(fs.is_dir(&report.paths.root));
    assert!(fs.is_dir(&report.paths.sdk));
    assert!(!fs.exists(&report.paths.config));
    assert_eq!(workdir.cwd(), start_dir());
}

#[tokio::test]
async fn test_install_reports_every_step() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);
    let reporter = RecordingReporter::default();

    run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect("install succeeds");

    let expected: Vec<String> = ProvisionStep::SEQUENCE
        .iter()
        .map(|s| s.description().to_string())
        .collect();
    assert_eq!(*reporter.steps.borrow(), expected);
}

#[tokio::test]
async fn test_install_removes_config_file_variant() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);
    let reporter = RecordingReporter::default();
    // A stray `.west` file (not a directory) from an older tool version.
    let config = paths("v3.7.0").config;
    fs.add_file(&config);

    run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect("install succeeds");

    assert!(!fs.exists(&config));
}

#[tokio::test]
async fn test_relative_home_is_anchored_before_entering_root() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);
    let reporter = RecordingReporter::default();
    let tools = tools();

    let report = install(
        &runner,
        &fs,
        &workdir,
        &reporter,
        InstallOptions {
            home: Path::new("zw"),
            version: "v3.7.0",
            tools: &tools,
            output: StepOutput::Inherit,
        },
    )
    .await
    .expect("install succeeds");

    let root = start_dir().join("zw").join("v3.7.0");
    assert_eq!(report.paths.root, root);
    assert!(runner.calls.borrow().iter().all(|c| c.cwd == root));
    assert!(
        runner
            .lines()
            .contains(&format!("west sdk install --install-dir {}", root.join("zephyr-sdk").display()))
    );
    assert!(fs.is_dir(&root.join("zephyr-sdk")));
    assert!(!fs.exists(&root.join(".west")));
    assert_eq!(workdir.cwd(), start_dir());
}

// ── Fatal step failures ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_failure_at_each_command_step_halts_sequence() {
    let commands = expected_commands("v3.7.0");
    for (index, step) in ProvisionStep::SEQUENCE[..commands.len()].iter().enumerate() {
        let fs = MemFs::default();
        let workdir = MockWorkdir::new(start_dir());
        let runner = RecordingRunner::failing_at(&fs, &workdir, index, 2);
        let reporter = RecordingReporter::default();

        let err = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
            .await
            .expect_err("install fails");

        assert_eq!(err.failed_step(), Some(*step), "failing index {index}");
        assert!(matches!(
            err,
            InstallError::StepFailed {
                exit: StepExit::Code(2),
                ..
            }
        ));
        assert_eq!(runner.lines(), &commands[..=index], "failing index {index}");
        assert_eq!(workdir.cwd(), start_dir(), "cwd restored after {step}");
    }
}

#[tokio::test]
async fn test_dependency_install_failure_skips_remove_and_cleanup() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::failing_at(&fs, &workdir, 3, 1);
    let reporter = RecordingReporter::default();

    let err = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect_err("install fails");

    assert_eq!(err.failed_step(), Some(ProvisionStep::DependencyInstall));
    assert_eq!(
        err.to_string(),
        "Provisioning step 'dependency-install' exited with status 1."
    );
    assert!(!runner.lines().iter().any(|l| l.contains("uninstall")));
    // Config cleanup never ran, so the workspace config from `west init` remains.
    assert!(fs.is_dir(&paths("v3.7.0").config));
    assert_eq!(workdir.cwd(), start_dir());
}

#[tokio::test]
async fn test_bootstrap_remove_failure_is_fatal_with_hint() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::failing_at(&fs, &workdir, 5, 1);
    let reporter = RecordingReporter::default();

    let err = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect_err("install fails");

    assert_eq!(err.failed_step(), Some(ProvisionStep::BootstrapRemove));
    assert!(err.to_string().contains("The SDK is installed"));
    assert!(fs.is_dir(&paths("v3.7.0").sdk));
}

#[tokio::test]
async fn test_launch_error_is_step_failure() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::unlaunchable(&fs, &workdir);
    let reporter = RecordingReporter::default();

    let err = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect_err("install fails");

    assert_eq!(err.failed_step(), Some(ProvisionStep::BootstrapInstall));
    assert!(matches!(
        err,
        InstallError::StepFailed {
            exit: StepExit::Launch(_),
            ..
        }
    ));
    assert_eq!(runner.calls.borrow().len(), 1);
    assert_eq!(workdir.cwd(), start_dir());
}

#[tokio::test]
async fn test_captured_failure_surfaces_stderr_tail() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::failing_at(&fs, &workdir, 2, 1);
    let reporter = RecordingReporter::default();

    run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Capture)
        .await
        .expect_err("install fails");

    let warnings = reporter.warnings.borrow();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].ends_with("ERROR: boom"));
}

// ── Best-effort cleanup ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_config_cleanup_failure_is_warning_only() {
    let fs = MemFs::default();
    fs.fail_remove.set(true);
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);
    let reporter = RecordingReporter::default();

    let report = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect("cleanup failure does not fail the install");

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].step, ProvisionStep::ConfigCleanup);
    assert!(
        reporter.warnings.borrow()[0].starts_with("config-cleanup failed:"),
        "{:?}",
        reporter.warnings.borrow()
    );
    assert_eq!(workdir.cwd(), start_dir());
}

// ── Staging failures ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_version_touches_nothing() {
    for bad in ["3.7.0", "", "latest", "v3.7.0/../x"] {
        let fs = MemFs::default();
        let workdir = MockWorkdir::new(start_dir());
        let runner = RecordingRunner::new(&fs, &workdir);
        let reporter = RecordingReporter::default();

        let err = run_install(&runner, &fs, &workdir, &reporter, bad, StepOutput::Inherit)
            .await
            .expect_err("invalid version rejected");

        assert!(matches!(err, InstallError::InvalidVersion(_)), "{bad}");
        assert!(fs.created.borrow().is_empty(), "{bad}");
        assert!(runner.calls.borrow().is_empty(), "{bad}");
        assert!(workdir.visited.borrow().is_empty(), "{bad}");
    }
}

#[tokio::test]
async fn test_directory_create_failure_runs_no_steps() {
    let fs = MemFs::default();
    fs.fail_create.set(true);
    let workdir = MockWorkdir::new(start_dir());
    let runner = RecordingRunner::new(&fs, &workdir);
    let reporter = RecordingReporter::default();

    let err = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect_err("create fails");

    assert!(matches!(err, InstallError::DirectoryCreateFailed { .. }));
    assert!(runner.calls.borrow().is_empty());
    assert_eq!(workdir.cwd(), start_dir());
}

#[tokio::test]
async fn test_chdir_failure_runs_no_steps() {
    let fs = MemFs::default();
    let workdir = MockWorkdir::refusing(start_dir(), paths("v3.7.0").root);
    let runner = RecordingRunner::new(&fs, &workdir);
    let reporter = RecordingReporter::default();

    let err = run_install(&runner, &fs, &workdir, &reporter, "v3.7.0", StepOutput::Inherit)
        .await
        .expect_err("chdir fails");

    assert!(matches!(err, InstallError::ChdirFailed { .. }));
    assert!(runner.calls.borrow().is_empty());
    assert_eq!(workdir.cwd(), start_dir());
}

// ── Real process working directory ───────────────────────────────────────────

/// Runner that creates tool side effects on disk, relative to the real cwd.
struct DiskRunner {
    fail_on: Option<&'static str>,
    seen_cwd: std::cell::RefCell<Vec<PathBuf>>,
}

impl DiskRunner {
    fn exit(&self, args: &[&str]) -> Result<i32> {
        let cwd = std::env::current_dir()?;
        self.seen_cwd.borrow_mut().push(cwd.clone());
        if self.fail_on.is_some_and(|a| args.first() == Some(&a)) {
            return Ok(1);
        }
        match args {
            ["init", ..] => std::fs::create_dir_all(cwd.join(".west"))?,
            ["sdk", "install", "--install-dir", dir] => std::fs::create_dir_all(dir)?,
            _ => {}
        }
        Ok(0)
    }
}

impl CommandRunner for DiskRunner {
    async fn run(&self, _program: &str, args: &[&str]) -> Result<Output> {
        let code = self.exit(args)?;
        Ok(Output {
            status: exit_status(code),
            stdout: Vec::new(),
            stderr: Vec::new(),
        })
    }

    async fn run_status(&self, _program: &str, args: &[&str]) -> Result<ExitStatus> {
        self.exit(args).map(exit_status)
    }
}

async fn install_on_disk(home: &Path, runner: &DiskRunner) -> Result<InstallReport, InstallError> {
    let tools = tools();
    install(
        runner,
        &StdFs,
        &ProcessWorkingDir,
        &RecordingReporter::default(),
        InstallOptions {
            home,
            version: "v3.7.0",
            tools: &tools,
            output: StepOutput::Capture,
        },
    )
    .await
}

#[tokio::test]
#[serial]
async fn test_real_cwd_restored_after_success() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let before = std::env::current_dir().expect("cwd");
    let runner = DiskRunner {
        fail_on: None,
        seen_cwd: std::cell::RefCell::default(),
    };

    let report = install_on_disk(tmp.path(), &runner)
        .await
        .expect("install succeeds");

    assert_eq!(std::env::current_dir().expect("cwd"), before);
    assert!(report.paths.sdk.is_dir());
    assert!(!report.paths.config.exists());
    let root = report.paths.root.canonicalize().expect("canonical root");
    assert!(
        runner
            .seen_cwd
            .borrow()
            .iter()
            .all(|c| c.canonicalize().expect("canonical cwd") == root)
    );
}

#[tokio::test]
#[serial]
async fn test_real_cwd_restored_after_failure() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let before = std::env::current_dir().expect("cwd");
    let runner = DiskRunner {
        fail_on: Some("update"),
        seen_cwd: std::cell::RefCell::default(),
    };

    let err = install_on_disk(tmp.path(), &runner)
        .await
        .expect_err("install fails");

    assert_eq!(err.failed_step(), Some(ProvisionStep::WorkspaceSync));
    assert_eq!(std::env::current_dir().expect("cwd"), before);
    assert!(tmp.path().join("v3.7.0").join(".west").is_dir());
}
