//! Human-readable terminal renderer.

use std::path::Path;

use owo_colors::OwoColorize as _;

use crate::application::services::ensure::EnsureOutcome;
use crate::application::services::registry::{InstallStatus, InstalledVersion};
use crate::application::services::setup::SetupOutcome;
use crate::domain::config::ZephyrwwConfig;
use crate::domain::step::ToolSettings;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        println!("zephyrww {version}");
    }

    /// Render the result of `ensure`.
    pub fn render_ensure(&self, outcome: &EnsureOutcome) {
        match outcome {
            EnsureOutcome::AlreadyInstalled { version, status } => {
                self.ctx
                    .success(&format!("Zephyr {version} is already installed"));
                if let Some(hint) = status_hint(*status, version.as_str()) {
                    self.ctx.warn(&hint);
                }
            }
            EnsureOutcome::Installed(report) => {
                if report.warnings.is_empty() {
                    self.ctx.success(&format!(
                        "Zephyr {} installed at {}",
                        report.version,
                        report.paths.root.display()
                    ));
                } else {
                    self.ctx.success(&format!(
                        "Zephyr {} installed at {} with {} cleanup warning(s)",
                        report.version,
                        report.paths.root.display(),
                        report.warnings.len()
                    ));
                }
                self.ctx.kv("SDK:", &report.paths.sdk.display().to_string());
            }
        }
    }

    /// Render the state of a single version.
    pub fn render_status(&self, installed: &InstalledVersion) {
        self.ctx.header(&format!("Zephyr {}", installed.version));
        self.ctx.kv("Status:", status_display(installed.status));
        self.ctx
            .kv("Root:  ", &installed.paths.root.display().to_string());
        self.ctx
            .kv("SDK:   ", &installed.paths.sdk.display().to_string());
        if let Some(hint) = status_hint(installed.status, &installed.version) {
            self.ctx.warn(&hint);
        }
    }

    /// Render every installation under `home`.
    pub fn render_list(&self, home: &Path, versions: &[InstalledVersion]) {
        if versions.is_empty() {
            self.ctx.info(&format!(
                "No Zephyr versions installed in {}. Install one: zephyrww ensure --zephyr-version <tag>",
                home.display()
            ));
            return;
        }
        if self.ctx.quiet {
            return;
        }
        println!(
            "  {}",
            format!("Installed in {}:", home.display()).style(self.ctx.styles.header)
        );
        println!();
        for v in versions {
            println!("{}", format_install_line(v));
        }
    }

    /// Render the latest published release tag.
    ///
    /// Printed bare, even with `--quiet`, so it can be captured by scripts.
    pub fn render_latest(&self, tag: &str) {
        println!("{tag}");
    }

    /// Render the result of `setup`.
    pub fn render_setup(&self, home: &Path, outcome: SetupOutcome) {
        if outcome.home_created || outcome.venv_created {
            self.ctx
                .success(&format!("Installation home ready at {}", home.display()));
        } else {
            self.ctx
                .info(&format!("Nothing to do in {}", home.display()));
        }
    }

    /// Render the result of `remove`.
    pub fn render_remove(&self, version: &str, removed: bool) {
        if removed {
            self.ctx.success(&format!("Removed Zephyr {version}"));
        } else {
            self.ctx.info(&format!("Zephyr {version} is not installed"));
        }
    }

    pub fn render_config_set(&self, key: &str, value: &str) {
        self.ctx.success(&format!("Set {key} = {value}"));
    }

    /// Render the effective configuration and the tools it resolves to.
    pub fn render_config(&self, config: &ZephyrwwConfig, tools: &ToolSettings, path: &Path) {
        if self.ctx.quiet {
            return;
        }
        println!();
        println!(
            "  {}",
            "Configuration".style(self.ctx.styles.header)
        );
        println!();
        println!("  {:<16} {}", "manifest.url:", config.manifest.url);
        println!("  {:<16} {}", "release.url:", config.release.url);
        println!("  {:<16} {}", "tools.python:", config.tools.python);
        println!("  {:<16} {}", "tools.pip:", tools.pip);
        println!("  {:<16} {}", "tools.west:", tools.west);
        println!();
        println!(
            "  {} {}",
            "Config file:".style(self.ctx.styles.dim),
            path.display()
        );
        println!();
    }
}

#[must_use]
pub fn status_display(status: InstallStatus) -> &'static str {
    match status {
        InstallStatus::Absent => "not installed",
        InstallStatus::Partial => "partial",
        InstallStatus::Complete => "complete",
    }
}

/// Advice for a version that exists but did not finish provisioning.
#[must_use]
pub fn status_hint(status: InstallStatus, version: &str) -> Option<String> {
    (status == InstallStatus::Partial).then(|| {
        format!(
            "Installation looks incomplete. To reinstall: zephyrww remove {version} && zephyrww ensure --zephyr-version {version}"
        )
    })
}

#[must_use]
pub fn format_install_line(installed: &InstalledVersion) -> String {
    format!(
        "  {:<12} {:<10} {}",
        installed.version,
        status_display(installed.status),
        installed.paths.root.display()
    )
}
