//! JSON output helpers.
//!
//! Every `--json` code path prints one pretty-printed object to stdout. Errors
//! use the shared `{ "error": true, "message", "code" }` shape.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::application::services::ensure::EnsureOutcome;
use crate::application::services::registry::InstalledVersion;
use crate::application::services::setup::SetupOutcome;
use crate::domain::config::ZephyrwwConfig;
use crate::domain::step::ToolSettings;

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    fn print(value: &impl Serialize) -> Result<()> {
        let out = serde_json::to_string_pretty(value).context("JSON serialization failed")?;
        println!("{out}");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "version": version }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_ensure(outcome: &EnsureOutcome) -> Result<()> {
        Self::print(&ensure_value(outcome))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_status(installed: &InstalledVersion) -> Result<()> {
        Self::print(installed)
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_list(home: &Path, versions: &[InstalledVersion]) -> Result<()> {
        Self::print(&serde_json::json!({
            "home": home,
            "versions": versions,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_latest(tag: &str) -> Result<()> {
        Self::print(&serde_json::json!({ "tag": tag }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_setup(home: &Path, outcome: SetupOutcome) -> Result<()> {
        Self::print(&serde_json::json!({
            "home": home,
            "home_created": outcome.home_created,
            "venv_created": outcome.venv_created,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_remove(version: &str, removed: bool) -> Result<()> {
        Self::print(&serde_json::json!({
            "version": version,
            "removed": removed,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(config: &ZephyrwwConfig, tools: &ToolSettings, path: &Path) -> Result<()> {
        Self::print(&serde_json::json!({
            "path": path,
            "config": config,
            "resolved": {
                "pip": tools.pip,
                "west": tools.west,
            },
        }))
    }
}

/// JSON shape of an `ensure` outcome.
#[must_use]
pub fn ensure_value(outcome: &EnsureOutcome) -> serde_json::Value {
    match outcome {
        EnsureOutcome::AlreadyInstalled { version, status } => serde_json::json!({
            "version": version.as_str(),
            "installed": false,
            "status": status,
            "warnings": [],
        }),
        EnsureOutcome::Installed(report) => serde_json::json!({
            "version": report.version.as_str(),
            "installed": true,
            "root": report.paths.root,
            "sdk": report.paths.sdk,
            "warnings": report
                .warnings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        }),
    }
}
